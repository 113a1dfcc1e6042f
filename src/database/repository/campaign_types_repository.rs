//! 战役类型（含领地列表与荣誉）

use crate::database::dto::CampaignTypeInput;
use crate::entity::prelude::*;
use crate::entity::{campaign_type_triumphs, campaign_types, territories};
use crate::error::{AppError, AppResult};
use sea_orm::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignTypeDetails {
    #[serde(flatten)]
    pub campaign_type: campaign_types::Model,
    pub territories: Vec<territories::Model>,
    pub triumphs: Vec<campaign_type_triumphs::Model>,
}

pub struct CampaignTypesRepository;

impl CampaignTypesRepository {
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<campaign_types::Model>, DbErr> {
        CampaignTypes::find()
            .order_by_asc(campaign_types::Column::CampaignTypeName)
            .all(db)
            .await
    }

    pub async fn details(db: &DatabaseConnection, id: i32) -> AppResult<CampaignTypeDetails> {
        let (campaign_type, territories, triumphs) = tokio::try_join!(
            CampaignTypes::find_by_id(id).one(db),
            Territories::find()
                .filter(territories::Column::CampaignTypeId.eq(id))
                .order_by_asc(territories::Column::TerritoryName)
                .all(db),
            CampaignTypeTriumphs::find()
                .filter(campaign_type_triumphs::Column::CampaignTypeId.eq(id))
                .order_by_asc(campaign_type_triumphs::Column::Id)
                .all(db),
        )?;

        Ok(CampaignTypeDetails {
            campaign_type: campaign_type
                .ok_or_else(|| AppError::not_found(format!("战役类型 {}", id)))?,
            territories,
            triumphs,
        })
    }

    async fn insert_children<C>(
        conn: &C,
        campaign_type_id: i32,
        input: &CampaignTypeInput,
    ) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        for name in input.territories.iter().filter(|n| !n.trim().is_empty()) {
            territories::ActiveModel {
                id: NotSet,
                campaign_type_id: Set(campaign_type_id),
                territory_name: Set(name.trim().to_string()),
            }
            .insert(conn)
            .await?;
        }
        for triumph in &input.triumphs {
            campaign_type_triumphs::ActiveModel {
                id: NotSet,
                campaign_type_id: Set(campaign_type_id),
                triumph: Set(triumph.triumph.clone()),
                criteria: Set(triumph.criteria.clone()),
            }
            .insert(conn)
            .await?;
        }
        Ok(())
    }

    pub async fn create(
        db: &DatabaseConnection,
        input: CampaignTypeInput,
    ) -> AppResult<CampaignTypeDetails> {
        if input.campaign_type_name.trim().is_empty() {
            return Err(AppError::bad_request("战役类型名称不能为空"));
        }

        let txn = db.begin().await?;
        let campaign_type = campaign_types::ActiveModel {
            id: NotSet,
            campaign_type_name: Set(input.campaign_type_name.trim().to_string()),
            description: Set(input.description.clone()),
        }
        .insert(&txn)
        .await?;
        Self::insert_children(&txn, campaign_type.id, &input).await?;
        txn.commit().await?;

        Self::details(db, campaign_type.id).await
    }

    /// 整体替换战役类型
    ///
    /// 名称仍在列表中的领地保留（已加入战役的领地不受影响），
    /// 不在列表中的领地删除，荣誉全部替换。
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        input: CampaignTypeInput,
    ) -> AppResult<CampaignTypeDetails> {
        if input.campaign_type_name.trim().is_empty() {
            return Err(AppError::bad_request("战役类型名称不能为空"));
        }

        let txn = db.begin().await?;
        CampaignTypes::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("战役类型 {}", id)))?;

        campaign_types::ActiveModel {
            id: Set(id),
            campaign_type_name: Set(input.campaign_type_name.trim().to_string()),
            description: Set(input.description.clone()),
        }
        .update(&txn)
        .await?;

        let existing = Territories::find()
            .filter(territories::Column::CampaignTypeId.eq(id))
            .all(&txn)
            .await?;
        let wanted: Vec<String> = input
            .territories
            .iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        let stale: Vec<i32> = existing
            .iter()
            .filter(|t| !wanted.contains(&t.territory_name))
            .map(|t| t.id)
            .collect();
        if !stale.is_empty() {
            Territories::delete_many()
                .filter(territories::Column::Id.is_in(stale))
                .exec(&txn)
                .await?;
        }

        CampaignTypeTriumphs::delete_many()
            .filter(campaign_type_triumphs::Column::CampaignTypeId.eq(id))
            .exec(&txn)
            .await?;

        let added = CampaignTypeInput {
            territories: wanted
                .into_iter()
                .filter(|n| !existing.iter().any(|t| &t.territory_name == n))
                .collect(),
            ..input
        };
        Self::insert_children(&txn, id, &added).await?;
        txn.commit().await?;

        Self::details(db, id).await
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let in_use = Campaigns::find()
            .filter(crate::entity::campaigns::Column::CampaignTypeId.eq(id))
            .count(db)
            .await?;
        if in_use > 0 {
            return Err(AppError::bad_request("仍有战役使用该类型，无法删除"));
        }

        let result = CampaignTypes::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("战役类型 {}", id)));
        }
        Ok(())
    }
}
