//! 数据仓库
//!
//! 每个仓库是一个无状态结构体，方法接收数据库连接或事务。
//! 需要在事务中复用的辅助方法对 `C: ConnectionTrait` 泛型。

pub mod campaign_types_repository;
pub mod campaigns_repository;
pub mod catalog_repository;
pub mod details_repository;
pub mod effects_repository;
pub mod fighter_equipment_repository;
pub mod fighters_repository;
pub mod gangs_repository;
pub mod lineages_repository;
pub mod profiles_repository;
pub mod rating_repository;
pub mod vehicles_repository;
