use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 战役中的领地，gang_id 为当前控制者
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaign_territories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub campaign_id: i32,
    pub territory_id: i32,
    #[sea_orm(column_type = "Text")]
    pub territory_name: String,
    pub gang_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
