//! 战士类型实体
//!
//! 雇佣战士时从这里复制基础属性和花费。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::special_rules::SpecialRules;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fighter_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub fighter_type: String,
    pub gang_type_id: Option<i32>,
    #[sea_orm(column_type = "Text")]
    pub fighter_class: String,
    pub cost: i32,

    // === 属性 ===
    pub movement: i32,
    pub weapon_skill: i32,
    pub ballistic_skill: i32,
    pub strength: i32,
    pub toughness: i32,
    pub wounds: i32,
    pub initiative: i32,
    pub attacks: i32,
    pub leadership: i32,
    pub cool: i32,
    pub willpower: i32,
    pub intelligence: i32,

    #[sea_orm(column_type = "Text", nullable)]
    pub special_rules: Option<SpecialRules>,
    pub is_hidden: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fighter_defaults::Entity")]
    FighterDefaults,
}

impl Related<super::fighter_defaults::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FighterDefaults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
