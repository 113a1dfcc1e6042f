use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub campaign_name: String,
    pub campaign_type_id: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub status: String,
    pub created_at: Option<i32>,
    pub updated_at: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::campaign_members::Entity")]
    CampaignMembers,
    #[sea_orm(has_many = "super::campaign_gangs::Entity")]
    CampaignGangs,
}

impl Related<super::campaign_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CampaignMembers.def()
    }
}

impl Related<super::campaign_gangs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CampaignGangs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
