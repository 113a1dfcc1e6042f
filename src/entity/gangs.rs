//! 帮派实体
//!
//! rating 是缓存值，由各个修改操作增量维护，可通过重新计算校正。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gangs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    pub gang_type_id: i32,
    pub gang_lineage_id: Option<i32>,

    // === 资源 ===
    pub credits: i32,
    pub reputation: i32,
    pub rating: i32,

    #[sea_orm(column_type = "Text")]
    pub alignment: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,

    // === 时间戳 ===
    pub created_at: Option<i32>,
    pub updated_at: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::UserId",
        to = "super::profiles::Column::Id",
        on_delete = "Cascade"
    )]
    Profiles,
    #[sea_orm(has_many = "super::fighters::Entity")]
    Fighters,
    #[sea_orm(has_many = "super::vehicles::Entity")]
    Vehicles,
    #[sea_orm(has_many = "super::fighter_equipment::Entity")]
    FighterEquipment,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl Related<super::fighters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fighters.def()
    }
}

impl Related<super::vehicles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicles.def()
    }
}

impl Related<super::fighter_equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FighterEquipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
