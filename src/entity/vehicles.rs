//! 载具实体
//!
//! fighter_id 为驾驶员；无驾驶员的载具不计入帮派评分。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub gang_id: i32,
    pub fighter_id: Option<i32>,
    pub vehicle_type_id: i32,
    #[sea_orm(column_type = "Text")]
    pub vehicle_name: String,
    pub cost: i32,

    // === 属性 ===
    pub movement: i32,
    pub front: i32,
    pub side: i32,
    pub rear: i32,
    pub hull_points: i32,
    pub handling: i32,
    pub save: i32,

    // === 槽位 ===
    pub body_slots: i32,
    pub drive_slots: i32,
    pub engine_slots: i32,

    pub created_at: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gangs::Entity",
        from = "Column::GangId",
        to = "super::gangs::Column::Id",
        on_delete = "Cascade"
    )]
    Gangs,
}

impl Related<super::gangs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gangs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
