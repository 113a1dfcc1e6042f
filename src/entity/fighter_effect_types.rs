//! 效果类型（模板）
//!
//! effect_category 例如 `injuries`、`advancements`、`equipment`、`vehicle_damage`、`user`。
//! 设置了 equipment_id 的效果类型会在购买该装备时自动附加。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fighter_effect_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub effect_name: String,
    #[sea_orm(column_type = "Text")]
    pub effect_category: String,
    pub equipment_id: Option<i32>,
    pub credits_increase: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fighter_effect_type_modifiers::Entity")]
    Modifiers,
}

impl Related<super::fighter_effect_type_modifiers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Modifiers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
