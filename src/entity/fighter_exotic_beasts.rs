use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 主人与异兽之间的关联
///
/// fighter_pet_id 指向的战士对外显示的 credits 恒为 0，
/// 其花费已计入主人购买装备时的 purchase_cost。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fighter_exotic_beasts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub fighter_owner_id: i32,
    pub fighter_pet_id: i32,
    pub fighter_equipment_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
