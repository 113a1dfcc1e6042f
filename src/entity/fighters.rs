//! 战士实体
//!
//! 属性列直接复制自战士类型，之后的变化通过效果（fighter_effects）叠加。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fighters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub gang_id: i32,
    pub user_id: i32,
    #[sea_orm(column_type = "Text")]
    pub fighter_name: String,
    pub fighter_type_id: i32,
    #[sea_orm(column_type = "Text")]
    pub fighter_class: String,
    pub credits: i32,
    pub cost_adjustment: i32,

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

    // === 战绩 ===
    pub xp: i32,
    pub kills: i32,

    // === 状态 ===
    pub killed: bool,
    pub retired: bool,
    pub enslaved: bool,
    pub starved: bool,
    pub recovery: bool,

    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,
    pub created_at: Option<i32>,
    pub updated_at: Option<i32>,
}

impl Model {
    /// 阵亡、退役、被奴役、饿死的战士不计入帮派评分
    pub fn is_active(&self) -> bool {
        !(self.killed || self.retired || self.enslaved || self.starved)
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
    #[sea_orm(has_many = "super::fighter_equipment::Entity")]
    FighterEquipment,
    #[sea_orm(has_many = "super::fighter_skills::Entity")]
    FighterSkills,
    #[sea_orm(has_many = "super::fighter_effects::Entity")]
    FighterEffects,
}

impl Related<super::gangs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gangs.def()
    }
}

impl Related<super::fighter_equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FighterEquipment.def()
    }
}

impl Related<super::fighter_skills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FighterSkills.def()
    }
}

impl Related<super::fighter_effects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FighterEffects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
