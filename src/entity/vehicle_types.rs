use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::special_rules::SpecialRules;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub vehicle_type: String,
    pub gang_type_id: Option<i32>,
    pub cost: i32,
    pub movement: i32,
    pub front: i32,
    pub side: i32,
    pub rear: i32,
    pub hull_points: i32,
    pub handling: i32,
    pub save: i32,
    pub body_slots: i32,
    pub drive_slots: i32,
    pub engine_slots: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub special_rules: Option<SpecialRules>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
