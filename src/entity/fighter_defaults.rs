use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 战士类型的默认装备（雇佣时免费发放）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fighter_defaults")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub fighter_type_id: i32,
    pub equipment_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fighter_types::Entity",
        from = "Column::FighterTypeId",
        to = "super::fighter_types::Column::Id",
        on_delete = "Cascade"
    )]
    FighterTypes,
    #[sea_orm(
        belongs_to = "super::equipment::Entity",
        from = "Column::EquipmentId",
        to = "super::equipment::Column::Id",
        on_delete = "Cascade"
    )]
    Equipment,
}

impl Related<super::fighter_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FighterTypes.def()
    }
}

impl Related<super::equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
