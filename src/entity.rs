//! 数据实体模块
//!
//! 包含所有 SeaORM 实体定义和 JSON 数据结构。

pub mod prelude;

// === JSON 数据结构 ===
pub mod special_rules;

// === 参考数据实体（管理后台维护）===
pub mod campaign_type_triumphs;
pub mod campaign_types;
pub mod equipment;
pub mod equipment_availability;
pub mod equipment_beasts;
pub mod equipment_discounts;
pub mod fighter_defaults;
pub mod fighter_effect_type_modifiers;
pub mod fighter_effect_types;
pub mod fighter_types;
pub mod gang_lineages;
pub mod gang_types;
pub mod profiles;
pub mod territories;
pub mod vehicle_equipment_profiles;
pub mod vehicle_types;
pub mod weapon_profiles;

// === 游戏数据实体 ===
pub mod campaign_battles;
pub mod campaign_gangs;
pub mod campaign_members;
pub mod campaign_territories;
pub mod campaigns;
pub mod fighter_effect_modifiers;
pub mod fighter_effects;
pub mod fighter_equipment;
pub mod fighter_exotic_beasts;
pub mod fighter_skills;
pub mod fighters;
pub mod gangs;
pub mod vehicles;
