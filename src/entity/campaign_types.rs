use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaign_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub campaign_type_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::territories::Entity")]
    Territories,
    #[sea_orm(has_many = "super::campaign_type_triumphs::Entity")]
    Triumphs,
}

impl Related<super::territories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Territories.def()
    }
}

impl Related<super::campaign_type_triumphs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Triumphs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
