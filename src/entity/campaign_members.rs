//! 战役成员
//!
//! role 取值 `OWNER`、`ARBITRATOR`、`MEMBER`。OWNER 与 ARBITRATOR 可管理战役。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const ROLE_OWNER: &str = "OWNER";
pub const ROLE_ARBITRATOR: &str = "ARBITRATOR";
pub const ROLE_MEMBER: &str = "MEMBER";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaign_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub campaign_id: i32,
    pub user_id: i32,
    #[sea_orm(column_type = "Text")]
    pub role: String,
}

impl Model {
    pub fn can_manage(&self) -> bool {
        self.role == ROLE_OWNER || self.role == ROLE_ARBITRATOR
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::campaigns::Entity",
        from = "Column::CampaignId",
        to = "super::campaigns::Column::Id",
        on_delete = "Cascade"
    )]
    Campaigns,
}

impl Related<super::campaigns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campaigns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
