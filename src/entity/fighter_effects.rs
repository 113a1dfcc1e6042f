//! 效果实例
//!
//! 属于某个战士（fighter_id）或某辆载具（vehicle_id）。
//! 由装备附带的效果记录 fighter_equipment_id，删除装备时级联删除。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fighter_effects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub fighter_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub fighter_effect_type_id: Option<i32>,
    pub fighter_equipment_id: Option<i32>,
    #[sea_orm(column_type = "Text")]
    pub effect_name: String,
    #[sea_orm(column_type = "Text")]
    pub effect_category: String,
    pub credits_increase: i32,
    pub created_at: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fighters::Entity",
        from = "Column::FighterId",
        to = "super::fighters::Column::Id",
        on_delete = "Cascade"
    )]
    Fighters,
    #[sea_orm(has_many = "super::fighter_effect_modifiers::Entity")]
    Modifiers,
}

impl Related<super::fighters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fighters.def()
    }
}

impl Related<super::fighter_effect_modifiers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Modifiers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
