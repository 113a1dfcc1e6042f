//! 帮派血统（legacy / affiliation）

use crate::database::dto::GangLineageInput;
use crate::entity::{gang_lineages, gangs};
use crate::entity::prelude::*;
use crate::error::{AppError, AppResult};
use sea_orm::sea_query::Expr;
use sea_orm::*;

const LINEAGE_TYPES: [&str; 2] = ["legacy", "affiliation"];

pub struct LineagesRepository;

impl LineagesRepository {
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<gang_lineages::Model>, DbErr> {
        GangLineages::find()
            .order_by_asc(gang_lineages::Column::LineageType)
            .order_by_asc(gang_lineages::Column::Name)
            .all(db)
            .await
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> AppResult<gang_lineages::Model> {
        GangLineages::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("帮派血统 {}", id)))
    }

    fn validate(input: &GangLineageInput) -> AppResult<()> {
        if input.name.trim().is_empty() {
            return Err(AppError::bad_request("血统名称不能为空"));
        }
        if !LINEAGE_TYPES.contains(&input.lineage_type.as_str()) {
            return Err(AppError::bad_request(format!(
                "无效的血统类型: {}",
                input.lineage_type
            )));
        }
        Ok(())
    }

    pub async fn create(
        db: &DatabaseConnection,
        input: GangLineageInput,
    ) -> AppResult<gang_lineages::Model> {
        Self::validate(&input)?;
        Ok(gang_lineages::ActiveModel {
            id: NotSet,
            name: Set(input.name.trim().to_string()),
            lineage_type: Set(input.lineage_type),
            gang_type_id: Set(input.gang_type_id),
            fighter_type_id: Set(input.fighter_type_id),
            description: Set(input.description),
        }
        .insert(db)
        .await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        input: GangLineageInput,
    ) -> AppResult<gang_lineages::Model> {
        Self::validate(&input)?;
        Self::get(db, id).await?;
        Ok(gang_lineages::ActiveModel {
            id: Set(id),
            name: Set(input.name.trim().to_string()),
            lineage_type: Set(input.lineage_type),
            gang_type_id: Set(input.gang_type_id),
            fighter_type_id: Set(input.fighter_type_id),
            description: Set(input.description),
        }
        .update(db)
        .await?)
    }

    /// 删除血统，引用它的帮派置空
    ///
    /// 返回受影响的帮派 ID。
    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<Vec<i32>> {
        let txn = db.begin().await?;
        let gang_ids: Vec<i32> = Gangs::find()
            .filter(gangs::Column::GangLineageId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|g| g.id)
            .collect();
        Gangs::update_many()
            .col_expr(
                gangs::Column::GangLineageId,
                Expr::value(Option::<i32>::None),
            )
            .filter(gangs::Column::GangLineageId.eq(id))
            .exec(&txn)
            .await?;

        let result = GangLineages::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("帮派血统 {}", id)));
        }
        txn.commit().await?;
        Ok(gang_ids)
    }
}
