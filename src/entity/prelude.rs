//! 预导入模块
//!
//! 提供常用类型的快捷导入。

// === 参考数据 ===
pub use super::campaign_type_triumphs::Entity as CampaignTypeTriumphs;
pub use super::campaign_types::Entity as CampaignTypes;
pub use super::equipment::Entity as Equipment;
pub use super::equipment_availability::Entity as EquipmentAvailability;
pub use super::equipment_beasts::Entity as EquipmentBeasts;
pub use super::equipment_discounts::Entity as EquipmentDiscounts;
pub use super::fighter_defaults::Entity as FighterDefaults;
pub use super::fighter_effect_type_modifiers::Entity as FighterEffectTypeModifiers;
pub use super::fighter_effect_types::Entity as FighterEffectTypes;
pub use super::fighter_types::Entity as FighterTypes;
pub use super::gang_lineages::Entity as GangLineages;
pub use super::gang_types::Entity as GangTypes;
pub use super::territories::Entity as Territories;
pub use super::vehicle_equipment_profiles::Entity as VehicleEquipmentProfiles;
pub use super::vehicle_types::Entity as VehicleTypes;
pub use super::weapon_profiles::Entity as WeaponProfiles;

// === 游戏数据 ===
pub use super::campaign_battles::Entity as CampaignBattles;
pub use super::campaign_gangs::Entity as CampaignGangs;
pub use super::campaign_members::Entity as CampaignMembers;
pub use super::campaign_territories::Entity as CampaignTerritories;
pub use super::campaigns::Entity as Campaigns;
pub use super::fighter_effect_modifiers::Entity as FighterEffectModifiers;
pub use super::fighter_effects::Entity as FighterEffects;
pub use super::fighter_equipment::Entity as FighterEquipment;
pub use super::fighter_exotic_beasts::Entity as FighterExoticBeasts;
pub use super::fighter_skills::Entity as FighterSkills;
pub use super::fighters::Entity as Fighters;
pub use super::gangs::Entity as Gangs;
pub use super::profiles::Entity as Profiles;
pub use super::vehicles::Entity as Vehicles;
