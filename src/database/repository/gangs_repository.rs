//! 帮派数据仓库
//!
//! 除了 CRUD 之外，这里集中了金币与评分的原子调整。
//! 所有修改金币的路径都必须经过 [`GangsRepository::debit_credits`]，保证余额不会为负。

use crate::database::dto::{CreateGangData, CreditsOperation, GangCreditsData, UpdateGangData};
use crate::database::pricing::within_amount_limit;
use crate::database::repository::rating_repository::RatingRepository;
use crate::entity::gangs;
use crate::entity::prelude::*;
use crate::error::{AppError, AppResult};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use serde::{Deserialize, Serialize};

/// 变更后的帮派金币与评分，随写操作一起返回
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GangBalance {
    pub gang_id: i32,
    pub credits: i32,
    pub rating: i32,
}

impl From<&gangs::Model> for GangBalance {
    fn from(gang: &gangs::Model) -> Self {
        Self {
            gang_id: gang.id,
            credits: gang.credits,
            rating: gang.rating,
        }
    }
}

/// 重新计算评分的结果
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RatingRecalculation {
    pub gang_id: i32,
    pub previous_rating: i32,
    pub rating: i32,
}

pub struct GangsRepository;

impl GangsRepository {
    // ==================== 查询操作 ====================

    pub async fn find_by_id<C>(conn: &C, id: i32) -> Result<Option<gangs::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Gangs::find_by_id(id).one(conn).await
    }

    /// 查询帮派，不存在时返回 NotFound
    pub async fn get<C>(conn: &C, id: i32) -> AppResult<gangs::Model>
    where
        C: ConnectionTrait,
    {
        Self::find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("帮派 {}", id)))
    }

    /// 获取用户拥有的全部帮派
    pub async fn list_by_user(
        db: &DatabaseConnection,
        user_id: i32,
    ) -> Result<Vec<gangs::Model>, DbErr> {
        Gangs::find()
            .filter(gangs::Column::UserId.eq(user_id))
            .order_by_asc(gangs::Column::Name)
            .all(db)
            .await
    }

    pub async fn balance<C>(conn: &C, id: i32) -> AppResult<GangBalance>
    where
        C: ConnectionTrait,
    {
        Ok(GangBalance::from(&Self::get(conn, id).await?))
    }

    // ==================== 帮派 CRUD 操作 ====================

    /// 创建帮派
    ///
    /// 未提供初始金币时使用 `starting_credits`，未提供阵营时使用帮派类型的阵营。
    pub async fn create(
        db: &DatabaseConnection,
        user_id: i32,
        data: CreateGangData,
        starting_credits: i32,
    ) -> AppResult<gangs::Model> {
        let name = data.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request("帮派名称不能为空"));
        }
        let credits = data.credits.unwrap_or(starting_credits);
        if credits < 0 {
            return Err(AppError::bad_request("初始金币不能为负数"));
        }
        Self::ensure_amount(credits, "初始金币")?;

        let gang_type = GangTypes::find_by_id(data.gang_type_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("帮派类型 {}", data.gang_type_id)))?;

        if let Some(lineage_id) = data.gang_lineage_id {
            GangLineages::find_by_id(lineage_id)
                .one(db)
                .await?
                .ok_or_else(|| AppError::not_found(format!("帮派血统 {}", lineage_id)))?;
        }

        let now = chrono::Utc::now().timestamp() as i32;
        let gang = gangs::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            name: Set(name),
            gang_type_id: Set(gang_type.id),
            gang_lineage_id: Set(data.gang_lineage_id),
            credits: Set(credits),
            reputation: Set(0),
            rating: Set(0),
            alignment: Set(data.alignment.unwrap_or(gang_type.alignment)),
            note: Set(None),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };

        let gang = gang.insert(db).await?;
        log::info!("用户 {} 创建帮派 {} ({})", user_id, gang.name, gang.id);
        Ok(gang)
    }

    /// 更新帮派
    ///
    /// 支持部分更新，未提供的字段保持不变
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        updates: UpdateGangData,
    ) -> AppResult<gangs::Model> {
        Self::get(db, id).await?;

        if let Some(Some(lineage_id)) = updates.gang_lineage_id {
            GangLineages::find_by_id(lineage_id)
                .one(db)
                .await?
                .ok_or_else(|| AppError::not_found(format!("帮派血统 {}", lineage_id)))?;
        }
        if updates.name.as_ref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::bad_request("帮派名称不能为空"));
        }

        let now = chrono::Utc::now().timestamp() as i32;
        let gang = gangs::ActiveModel {
            id: Set(id),
            name: updates.name.map(|n| n.trim().to_string()).map_or(NotSet, Set),
            alignment: updates.alignment.map_or(NotSet, Set),
            reputation: updates.reputation.map_or(NotSet, Set),
            note: updates.note.map_or(NotSet, Set),
            gang_lineage_id: updates.gang_lineage_id.map_or(NotSet, Set),
            updated_at: Set(Some(now)),
            ..Default::default()
        };

        Ok(gang.update(db).await?)
    }

    /// 删除帮派（战士、载具、装备级联删除）
    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let result = Gangs::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("帮派 {}", id)));
        }
        log::info!("删除帮派 {}", id);
        Ok(())
    }

    // ==================== 金币与评分 ====================

    /// 校验用户输入的金币数额不超过单次上限
    pub fn ensure_amount(value: i32, field: &str) -> AppResult<()> {
        if within_amount_limit(value) {
            Ok(())
        } else {
            Err(AppError::bad_request(format!("{}超出允许范围", field)))
        }
    }

    /// 按操作类型增减金币
    pub async fn apply_credits_operation(
        db: &DatabaseConnection,
        id: i32,
        data: GangCreditsData,
    ) -> AppResult<GangBalance> {
        if data.amount < 0 {
            return Err(AppError::bad_request("金币数量不能为负数"));
        }
        Self::ensure_amount(data.amount, "金币数量")?;
        match data.operation {
            CreditsOperation::Add => Self::adjust_credits(db, id, data.amount).await?,
            CreditsOperation::Subtract => Self::debit_credits(db, id, data.amount).await?,
        }
        Self::balance(db, id).await
    }

    /// 原子扣除金币
    ///
    /// 使用条件更新 `credits >= amount`，余额不足时不修改任何数据。
    pub async fn debit_credits<C>(conn: &C, id: i32, amount: i32) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        if amount < 0 {
            return Err(AppError::bad_request("花费不能为负数"));
        }
        let now = chrono::Utc::now().timestamp() as i32;
        let result = Gangs::update_many()
            .col_expr(
                gangs::Column::Credits,
                Expr::col(gangs::Column::Credits).sub(amount),
            )
            .col_expr(gangs::Column::UpdatedAt, Expr::value(Some(now)))
            .filter(gangs::Column::Id.eq(id))
            .filter(gangs::Column::Credits.gte(amount))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            let gang = Self::get(conn, id).await?;
            return Err(AppError::InsufficientCredits {
                required: amount,
                available: gang.credits,
            });
        }
        Ok(())
    }

    /// 在 SQL 中原子地给整数列加上 delta
    ///
    /// 条件更新保证结果仍在 i32 范围内；越界时不修改数据并返回 400。
    async fn add_to_column<C>(
        conn: &C,
        id: i32,
        column: gangs::Column,
        delta: i32,
        what: &str,
    ) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        if delta == 0 {
            return Ok(());
        }
        let in_range = if delta > 0 {
            column.lte(i32::MAX - delta)
        } else {
            column.gte(i32::MIN - delta)
        };
        let result = Gangs::update_many()
            .col_expr(column, Expr::col(column).add(delta))
            .filter(gangs::Column::Id.eq(id))
            .filter(in_range)
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            Self::get(conn, id).await?;
            return Err(AppError::bad_request(format!("帮派{}超出允许范围", what)));
        }
        Ok(())
    }

    /// 增加（或退还）金币
    pub async fn adjust_credits<C>(conn: &C, id: i32, delta: i32) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        Self::add_to_column(conn, id, gangs::Column::Credits, delta, "金币").await
    }

    /// 增量调整评分
    pub async fn adjust_rating<C>(conn: &C, id: i32, delta: i32) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        if delta != 0 {
            log::debug!("帮派 {} 评分变化 {:+}", id, delta);
        }
        Self::add_to_column(conn, id, gangs::Column::Rating, delta, "评分").await
    }

    /// 从头计算并保存评分
    pub async fn recalculate_rating(
        db: &DatabaseConnection,
        id: i32,
    ) -> AppResult<RatingRecalculation> {
        let txn = db.begin().await?;
        let gang = Self::get(&txn, id).await?;
        let rating = RatingRepository::compute_gang_rating(&txn, id).await?;

        if rating != gang.rating {
            log::warn!(
                "帮派 {} 的缓存评分 {} 与重新计算结果 {} 不一致，已修正",
                id,
                gang.rating,
                rating
            );
        }

        gangs::ActiveModel {
            id: Set(id),
            rating: Set(rating),
            ..Default::default()
        }
        .update(&txn)
        .await?;
        txn.commit().await?;

        Ok(RatingRecalculation {
            gang_id: id,
            previous_rating: gang.rating,
            rating,
        })
    }
}
