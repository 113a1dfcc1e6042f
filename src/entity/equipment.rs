//! 装备实体
//!
//! equipment_type 取值 `weapon`、`wargear` 或 `vehicle_upgrade`，
//! 只有 weapon 才能大师级打造。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const TYPE_WEAPON: &str = "weapon";
pub const TYPE_WARGEAR: &str = "wargear";
pub const TYPE_VEHICLE_UPGRADE: &str = "vehicle_upgrade";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "equipment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub equipment_name: String,
    #[sea_orm(column_type = "Text")]
    pub equipment_category: String,
    #[sea_orm(column_type = "Text")]
    pub equipment_type: String,
    pub cost: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub availability: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub faction: Option<String>,
    pub core_equipment: bool,
    pub created_at: Option<i32>,
}

impl Model {
    pub fn is_weapon(&self) -> bool {
        self.equipment_type == TYPE_WEAPON
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::weapon_profiles::Entity")]
    WeaponProfiles,
    #[sea_orm(has_many = "super::equipment_discounts::Entity")]
    EquipmentDiscounts,
}

impl Related<super::weapon_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WeaponProfiles.def()
    }
}

impl Related<super::equipment_discounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EquipmentDiscounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
