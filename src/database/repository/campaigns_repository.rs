//! 战役数据仓库
//!
//! 成员角色：OWNER（创建者）、ARBITRATOR（裁判）、MEMBER。
//! 权限检查在路由层完成，这里只负责数据规则。

use crate::database::dto::{
    AddCampaignGangData, AddMemberData, AddTerritoryData, AssignTerritoryData,
    CreateCampaignData, RecordBattleData, UpdateCampaignData,
};
use crate::entity::prelude::*;
use crate::entity::{
    campaign_battles, campaign_gangs, campaign_members, campaign_territories,
    campaign_type_triumphs, campaign_types, campaigns, gangs, profiles,
};
use crate::error::{AppError, AppResult};
use sea_orm::*;
use serde::{Deserialize, Serialize};

pub const STATUS_ACTIVE: &str = "active";
const STATUSES: [&str; 3] = [STATUS_ACTIVE, "paused", "finished"];

/// 战役成员（附带用户名）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberView {
    #[serde(flatten)]
    pub member: campaign_members::Model,
    pub username: Option<String>,
}

/// 参战帮派（附带帮派名称）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignGangView {
    #[serde(flatten)]
    pub link: campaign_gangs::Model,
    pub gang_name: Option<String>,
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignDetails {
    #[serde(flatten)]
    pub campaign: campaigns::Model,
    pub campaign_type: Option<campaign_types::Model>,
    pub members: Vec<MemberView>,
    pub gangs: Vec<CampaignGangView>,
    pub territories: Vec<campaign_territories::Model>,
    pub battles: Vec<campaign_battles::Model>,
    pub triumphs: Vec<campaign_type_triumphs::Model>,
}

pub struct CampaignsRepository;

impl CampaignsRepository {
    // ==================== 查询操作 ====================

    pub async fn get<C>(conn: &C, id: i32) -> AppResult<campaigns::Model>
    where
        C: ConnectionTrait,
    {
        Campaigns::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("战役 {}", id)))
    }

    /// 用户在战役中的成员记录
    pub async fn membership<C>(
        conn: &C,
        campaign_id: i32,
        user_id: i32,
    ) -> Result<Option<campaign_members::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        CampaignMembers::find()
            .filter(campaign_members::Column::CampaignId.eq(campaign_id))
            .filter(campaign_members::Column::UserId.eq(user_id))
            .one(conn)
            .await
    }

    /// 用户参与的全部战役
    pub async fn list_for_user(
        db: &DatabaseConnection,
        user_id: i32,
    ) -> Result<Vec<campaigns::Model>, DbErr> {
        let ids: Vec<i32> = CampaignMembers::find()
            .filter(campaign_members::Column::UserId.eq(user_id))
            .all(db)
            .await?
            .into_iter()
            .map(|m| m.campaign_id)
            .collect();

        Campaigns::find()
            .filter(campaigns::Column::Id.is_in(ids))
            .order_by_desc(campaigns::Column::UpdatedAt)
            .all(db)
            .await
    }

    /// 参战帮派 ID
    pub async fn gang_ids<C>(conn: &C, campaign_id: i32) -> Result<Vec<i32>, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(CampaignGangs::find()
            .filter(campaign_gangs::Column::CampaignId.eq(campaign_id))
            .all(conn)
            .await?
            .into_iter()
            .map(|l| l.gang_id)
            .collect())
    }

    /// 战役详情：成员、帮派、领地、战斗、荣誉
    pub async fn details(db: &DatabaseConnection, id: i32) -> AppResult<CampaignDetails> {
        let campaign = Self::get(db, id).await?;

        let (campaign_type, members, links, territories, battles, triumphs) = tokio::try_join!(
            CampaignTypes::find_by_id(campaign.campaign_type_id).one(db),
            CampaignMembers::find()
                .filter(campaign_members::Column::CampaignId.eq(id))
                .order_by_asc(campaign_members::Column::Id)
                .all(db),
            CampaignGangs::find()
                .filter(campaign_gangs::Column::CampaignId.eq(id))
                .order_by_asc(campaign_gangs::Column::Id)
                .all(db),
            CampaignTerritories::find()
                .filter(campaign_territories::Column::CampaignId.eq(id))
                .order_by_asc(campaign_territories::Column::Id)
                .all(db),
            CampaignBattles::find()
                .filter(campaign_battles::Column::CampaignId.eq(id))
                .order_by_desc(campaign_battles::Column::Id)
                .all(db),
            CampaignTypeTriumphs::find()
                .filter(campaign_type_triumphs::Column::CampaignTypeId.eq(campaign.campaign_type_id))
                .order_by_asc(campaign_type_triumphs::Column::Id)
                .all(db),
        )?;

        let user_ids: Vec<i32> = members.iter().map(|m| m.user_id).collect();
        let gang_ids: Vec<i32> = links.iter().map(|l| l.gang_id).collect();
        let (users, gangs) = tokio::try_join!(
            Profiles::find()
                .filter(profiles::Column::Id.is_in(user_ids))
                .all(db),
            Gangs::find().filter(gangs::Column::Id.is_in(gang_ids)).all(db),
        )?;

        let members = members
            .into_iter()
            .map(|member| MemberView {
                username: users
                    .iter()
                    .find(|u| u.id == member.user_id)
                    .map(|u| u.username.clone()),
                member,
            })
            .collect();
        let gangs = links
            .into_iter()
            .map(|link| {
                let gang = gangs.iter().find(|g| g.id == link.gang_id);
                CampaignGangView {
                    gang_name: gang.map(|g| g.name.clone()),
                    rating: gang.map(|g| g.rating),
                    link,
                }
            })
            .collect();

        Ok(CampaignDetails {
            campaign,
            campaign_type,
            members,
            gangs,
            territories,
            battles,
            triumphs,
        })
    }

    // ==================== 战役 CRUD 操作 ====================

    /// 创建战役，创建者成为 OWNER
    pub async fn create(
        db: &DatabaseConnection,
        user_id: i32,
        data: CreateCampaignData,
    ) -> AppResult<campaigns::Model> {
        let name = data.campaign_name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request("战役名称不能为空"));
        }

        let txn = db.begin().await?;
        CampaignTypes::find_by_id(data.campaign_type_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("战役类型 {}", data.campaign_type_id)))?;

        let now = chrono::Utc::now().timestamp() as i32;
        let campaign = campaigns::ActiveModel {
            id: NotSet,
            campaign_name: Set(name),
            campaign_type_id: Set(data.campaign_type_id),
            description: Set(data.description),
            status: Set(STATUS_ACTIVE.to_string()),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        }
        .insert(&txn)
        .await?;

        campaign_members::ActiveModel {
            id: NotSet,
            campaign_id: Set(campaign.id),
            user_id: Set(user_id),
            role: Set(campaign_members::ROLE_OWNER.to_string()),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        log::info!("用户 {} 创建战役 {} ({})", user_id, campaign.campaign_name, campaign.id);
        Ok(campaign)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        updates: UpdateCampaignData,
    ) -> AppResult<campaigns::Model> {
        Self::get(db, id).await?;
        if let Some(status) = &updates.status {
            if !STATUSES.contains(&status.as_str()) {
                return Err(AppError::bad_request(format!("无效的战役状态: {}", status)));
            }
        }
        if updates
            .campaign_name
            .as_ref()
            .is_some_and(|n| n.trim().is_empty())
        {
            return Err(AppError::bad_request("战役名称不能为空"));
        }

        let now = chrono::Utc::now().timestamp() as i32;
        Ok(campaigns::ActiveModel {
            id: Set(id),
            campaign_name: updates
                .campaign_name
                .map(|n| n.trim().to_string())
                .map_or(NotSet, Set),
            status: updates.status.map_or(NotSet, Set),
            description: updates.description.map_or(NotSet, Set),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .update(db)
        .await?)
    }

    /// 删除战役（成员、帮派链接、领地、战斗级联删除）
    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let result = Campaigns::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("战役 {}", id)));
        }
        log::info!("删除战役 {}", id);
        Ok(())
    }

    async fn touch<C>(conn: &C, id: i32) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now().timestamp() as i32;
        campaigns::ActiveModel {
            id: Set(id),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .update(conn)
        .await?;
        Ok(())
    }

    // ==================== 成员 ====================

    pub async fn add_member(
        db: &DatabaseConnection,
        campaign_id: i32,
        data: AddMemberData,
    ) -> AppResult<campaign_members::Model> {
        let role = data
            .role
            .unwrap_or_else(|| campaign_members::ROLE_MEMBER.to_string())
            .to_uppercase();
        if role != campaign_members::ROLE_ARBITRATOR && role != campaign_members::ROLE_MEMBER {
            return Err(AppError::bad_request(format!("无效的成员角色: {}", role)));
        }

        let txn = db.begin().await?;
        Self::get(&txn, campaign_id).await?;
        Profiles::find_by_id(data.user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("用户 {}", data.user_id)))?;
        if Self::membership(&txn, campaign_id, data.user_id)
            .await?
            .is_some()
        {
            return Err(AppError::bad_request("该用户已是战役成员"));
        }

        let member = campaign_members::ActiveModel {
            id: NotSet,
            campaign_id: Set(campaign_id),
            user_id: Set(data.user_id),
            role: Set(role),
        }
        .insert(&txn)
        .await?;
        Self::touch(&txn, campaign_id).await?;
        txn.commit().await?;
        Ok(member)
    }

    /// 移除成员，同时移除该成员的参战帮派；OWNER 不能被移除
    ///
    /// 返回被移出战役的帮派 ID。
    pub async fn remove_member(
        db: &DatabaseConnection,
        campaign_id: i32,
        user_id: i32,
    ) -> AppResult<Vec<i32>> {
        let txn = db.begin().await?;
        let member = Self::membership(&txn, campaign_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("战役成员 {}", user_id)))?;
        if member.role == campaign_members::ROLE_OWNER {
            return Err(AppError::bad_request("不能移除战役创建者"));
        }

        let links = CampaignGangs::find()
            .filter(campaign_gangs::Column::CampaignId.eq(campaign_id))
            .filter(campaign_gangs::Column::UserId.eq(user_id))
            .all(&txn)
            .await?;
        let mut gang_ids = Vec::with_capacity(links.len());
        for link in links {
            Self::detach_gang(&txn, campaign_id, link.gang_id).await?;
            gang_ids.push(link.gang_id);
        }

        CampaignMembers::delete_by_id(member.id).exec(&txn).await?;
        Self::touch(&txn, campaign_id).await?;
        txn.commit().await?;
        Ok(gang_ids)
    }

    // ==================== 参战帮派 ====================

    /// 添加参战帮派，帮派拥有者必须是战役成员
    pub async fn add_gang(
        db: &DatabaseConnection,
        campaign_id: i32,
        data: AddCampaignGangData,
    ) -> AppResult<campaign_gangs::Model> {
        let txn = db.begin().await?;
        Self::get(&txn, campaign_id).await?;
        let gang = Gangs::find_by_id(data.gang_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("帮派 {}", data.gang_id)))?;

        if Self::membership(&txn, campaign_id, gang.user_id)
            .await?
            .is_none()
        {
            return Err(AppError::bad_request("帮派拥有者不是战役成员"));
        }
        let exists = CampaignGangs::find()
            .filter(campaign_gangs::Column::CampaignId.eq(campaign_id))
            .filter(campaign_gangs::Column::GangId.eq(gang.id))
            .count(&txn)
            .await?;
        if exists > 0 {
            return Err(AppError::bad_request("帮派已在战役中"));
        }

        let link = campaign_gangs::ActiveModel {
            id: NotSet,
            campaign_id: Set(campaign_id),
            gang_id: Set(gang.id),
            user_id: Set(gang.user_id),
        }
        .insert(&txn)
        .await?;
        Self::touch(&txn, campaign_id).await?;
        txn.commit().await?;
        Ok(link)
    }

    /// 帮派退出战役：释放其领地并删除链接
    async fn detach_gang<C>(conn: &C, campaign_id: i32, gang_id: i32) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        CampaignTerritories::update_many()
            .col_expr(
                campaign_territories::Column::GangId,
                sea_orm::sea_query::Expr::value(Option::<i32>::None),
            )
            .filter(campaign_territories::Column::CampaignId.eq(campaign_id))
            .filter(campaign_territories::Column::GangId.eq(gang_id))
            .exec(conn)
            .await?;

        let result = CampaignGangs::delete_many()
            .filter(campaign_gangs::Column::CampaignId.eq(campaign_id))
            .filter(campaign_gangs::Column::GangId.eq(gang_id))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn remove_gang(
        db: &DatabaseConnection,
        campaign_id: i32,
        gang_id: i32,
    ) -> AppResult<()> {
        let txn = db.begin().await?;
        if Self::detach_gang(&txn, campaign_id, gang_id).await? == 0 {
            return Err(AppError::not_found(format!("战役中的帮派 {}", gang_id)));
        }
        Self::touch(&txn, campaign_id).await?;
        txn.commit().await?;
        Ok(())
    }

    // ==================== 领地 ====================

    /// 从战役类型的领地列表中添加领地（不分配给任何帮派）
    pub async fn add_territory(
        db: &DatabaseConnection,
        campaign_id: i32,
        data: AddTerritoryData,
    ) -> AppResult<campaign_territories::Model> {
        let txn = db.begin().await?;
        let campaign = Self::get(&txn, campaign_id).await?;
        let territory = Territories::find_by_id(data.territory_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("领地 {}", data.territory_id)))?;
        if territory.campaign_type_id != campaign.campaign_type_id {
            return Err(AppError::bad_request("领地不属于该战役类型"));
        }

        let added = campaign_territories::ActiveModel {
            id: NotSet,
            campaign_id: Set(campaign.id),
            territory_id: Set(territory.id),
            territory_name: Set(territory.territory_name),
            gang_id: Set(None),
        }
        .insert(&txn)
        .await?;
        Self::touch(&txn, campaign.id).await?;
        txn.commit().await?;
        Ok(added)
    }

    pub async fn get_territory<C>(conn: &C, id: i32) -> AppResult<campaign_territories::Model>
    where
        C: ConnectionTrait,
    {
        CampaignTerritories::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("战役领地 {}", id)))
    }

    /// 分配或释放领地，接收领地的帮派必须参与该战役
    pub async fn assign_territory(
        db: &DatabaseConnection,
        id: i32,
        data: AssignTerritoryData,
    ) -> AppResult<campaign_territories::Model> {
        let txn = db.begin().await?;
        let territory = Self::get_territory(&txn, id).await?;
        if let Some(gang_id) = data.gang_id {
            if !Self::gang_ids(&txn, territory.campaign_id)
                .await?
                .contains(&gang_id)
            {
                return Err(AppError::bad_request("帮派未参与该战役"));
            }
        }

        let updated = campaign_territories::ActiveModel {
            id: Set(territory.id),
            gang_id: Set(data.gang_id),
            ..Default::default()
        }
        .update(&txn)
        .await?;
        Self::touch(&txn, territory.campaign_id).await?;
        txn.commit().await?;
        Ok(updated)
    }

    pub async fn remove_territory(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let result = CampaignTerritories::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("战役领地 {}", id)));
        }
        Ok(())
    }

    // ==================== 战斗 ====================

    /// 记录战斗，进攻方、防守方和胜者都必须是参战帮派
    pub async fn record_battle(
        db: &DatabaseConnection,
        campaign_id: i32,
        data: RecordBattleData,
    ) -> AppResult<campaign_battles::Model> {
        let scenario = data.scenario.trim().to_string();
        if scenario.is_empty() {
            return Err(AppError::bad_request("战斗场景不能为空"));
        }

        let txn = db.begin().await?;
        Self::get(&txn, campaign_id).await?;
        let gang_ids = Self::gang_ids(&txn, campaign_id).await?;
        for gang_id in [data.attacker_id, data.defender_id, data.winner_id]
            .into_iter()
            .flatten()
        {
            if !gang_ids.contains(&gang_id) {
                return Err(AppError::bad_request(format!("帮派 {} 未参与该战役", gang_id)));
            }
        }
        if let Some(winner) = data.winner_id {
            if Some(winner) != data.attacker_id && Some(winner) != data.defender_id {
                return Err(AppError::bad_request("胜者必须是进攻方或防守方"));
            }
        }

        let now = chrono::Utc::now().timestamp() as i32;
        let battle = campaign_battles::ActiveModel {
            id: NotSet,
            campaign_id: Set(campaign_id),
            attacker_id: Set(data.attacker_id),
            defender_id: Set(data.defender_id),
            winner_id: Set(data.winner_id),
            scenario: Set(scenario),
            note: Set(data.note),
            created_at: Set(Some(now)),
        }
        .insert(&txn)
        .await?;
        Self::touch(&txn, campaign_id).await?;
        txn.commit().await?;
        Ok(battle)
    }

    pub async fn get_battle<C>(conn: &C, id: i32) -> AppResult<campaign_battles::Model>
    where
        C: ConnectionTrait,
    {
        CampaignBattles::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("战斗记录 {}", id)))
    }

    pub async fn delete_battle(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let result = CampaignBattles::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("战斗记录 {}", id)));
        }
        Ok(())
    }
}
