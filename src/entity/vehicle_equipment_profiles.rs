use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 载具升级的属性加成（body / drive / engine 槽位）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle_equipment_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub equipment_id: i32,
    #[sea_orm(column_type = "Text")]
    pub upgrade_type: String,
    pub movement: i32,
    pub front: i32,
    pub side: i32,
    pub rear: i32,
    pub hull_points: i32,
    pub handling: i32,
    pub save: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
