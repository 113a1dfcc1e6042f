use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fighter_skills")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub fighter_id: i32,
    #[sea_orm(column_type = "Text")]
    pub skill_name: String,
    pub credits_increase: i32,
    pub xp_cost: i32,
    pub is_advance: bool,
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
}

impl Related<super::fighters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fighters.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
