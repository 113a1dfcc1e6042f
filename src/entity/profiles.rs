//! 用户资料实体
//!
//! 身份认证由上游代理完成，此表只保存用户名和角色。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text", unique)]
    pub username: String,
    #[sea_orm(column_type = "Text")]
    pub user_role: String,
    pub created_at: Option<i32>,
}

impl Model {
    pub fn is_admin(&self) -> bool {
        self.user_role == ROLE_ADMIN
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::gangs::Entity")]
    Gangs,
}

impl Related<super::gangs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gangs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
