use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fighter_effect_type_modifiers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub fighter_effect_type_id: i32,
    #[sea_orm(column_type = "Text")]
    pub stat_name: String,
    pub default_numeric_value: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fighter_effect_types::Entity",
        from = "Column::FighterEffectTypeId",
        to = "super::fighter_effect_types::Column::Id",
        on_delete = "Cascade"
    )]
    FighterEffectTypes,
}

impl Related<super::fighter_effect_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FighterEffectTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
