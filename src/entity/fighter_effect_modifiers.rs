use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fighter_effect_modifiers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub fighter_effect_id: i32,
    #[sea_orm(column_type = "Text")]
    pub stat_name: String,
    pub numeric_value: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fighter_effects::Entity",
        from = "Column::FighterEffectId",
        to = "super::fighter_effects::Column::Id",
        on_delete = "Cascade"
    )]
    FighterEffects,
}

impl Related<super::fighter_effects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FighterEffects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
