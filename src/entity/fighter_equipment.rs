//! 装备持有记录
//!
//! fighter_id 与 vehicle_id 均为空时表示该装备在帮派仓库（stash）中。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fighter_equipment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub gang_id: i32,
    pub fighter_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub equipment_id: i32,
    pub purchase_cost: i32,
    pub original_cost: i32,
    pub is_master_crafted: bool,
    pub created_at: Option<i32>,
}

impl Model {
    pub fn in_stash(&self) -> bool {
        self.fighter_id.is_none() && self.vehicle_id.is_none()
    }
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
    #[sea_orm(
        belongs_to = "super::fighters::Entity",
        from = "Column::FighterId",
        to = "super::fighters::Column::Id",
        on_delete = "Cascade"
    )]
    Fighters,
    #[sea_orm(
        belongs_to = "super::equipment::Entity",
        from = "Column::EquipmentId",
        to = "super::equipment::Column::Id"
    )]
    Equipment,
}

impl Related<super::gangs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gangs.def()
    }
}

impl Related<super::fighters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fighters.def()
    }
}

impl Related<super::equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
