use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weapon_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub weapon_id: i32,
    #[sea_orm(column_type = "Text")]
    pub profile_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub range_short: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub range_long: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub acc_short: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub acc_long: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub strength: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub ap: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub damage: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub ammo: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub traits: Option<String>,
    pub sort_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::equipment::Entity",
        from = "Column::WeaponId",
        to = "super::equipment::Column::Id",
        on_delete = "Cascade"
    )]
    Equipment,
}

impl Related<super::equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equipment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
