use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaign_type_triumphs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub campaign_type_id: i32,
    #[sea_orm(column_type = "Text")]
    pub triumph: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub criteria: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::campaign_types::Entity",
        from = "Column::CampaignTypeId",
        to = "super::campaign_types::Column::Id",
        on_delete = "Cascade"
    )]
    CampaignTypes,
}

impl Related<super::campaign_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CampaignTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
