//! 数据传输对象 (DTO)
//!
//! 用于 HTTP 请求体的结构定义。
//! 更新类结构使用 Option<Option<T>> 区分"未提供字段"和"显式设为 null"。

use serde::{Deserialize, Deserializer, Serialize};

use crate::database::stats::StatBlock;

/// 辅助函数：支持 Option<Option<T>> 的反序列化
/// 用于区分"未提供字段"和"显式设为 null"
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

// ==================== 帮派 ====================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateGangData {
    pub name: String,
    pub gang_type_id: i32,
    /// 为空时使用配置中的初始金币
    pub credits: Option<i32>,
    /// 为空时使用帮派类型的阵营
    pub alignment: Option<String>,
    pub gang_lineage_id: Option<i32>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateGangData {
    pub name: Option<String>,
    pub alignment: Option<String>,
    pub reputation: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub note: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub gang_lineage_id: Option<Option<i32>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditsOperation {
    Add,
    Subtract,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GangCreditsData {
    pub operation: CreditsOperation,
    pub amount: i32,
}

// ==================== 战士 ====================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HireFighterData {
    pub fighter_type_id: i32,
    pub fighter_name: String,
    /// 手动指定雇佣花费，为空时使用战士类型的花费
    pub cost: Option<i32>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateFighterData {
    pub fighter_name: Option<String>,
    pub xp: Option<i32>,
    pub kills: Option<i32>,
    pub cost_adjustment: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub note: Option<Option<String>>,

    // === 状态 ===
    pub killed: Option<bool>,
    pub retired: Option<bool>,
    pub enslaved: Option<bool>,
    pub starved: Option<bool>,
    pub recovery: Option<bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddSkillData {
    pub skill_name: String,
    #[serde(default)]
    pub credits_increase: i32,
    #[serde(default)]
    pub xp_cost: i32,
    #[serde(default)]
    pub is_advance: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModifierInput {
    pub stat_name: String,
    pub numeric_value: i32,
}

/// 添加效果
///
/// 提供 fighter_effect_type_id 时从效果类型复制名称、分类、花费和修正值，
/// 其余字段可覆盖模板；不提供时为用户自定义效果，effect_name 必填。
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AddEffectData {
    pub fighter_effect_type_id: Option<i32>,
    pub effect_name: Option<String>,
    pub effect_category: Option<String>,
    pub credits_increase: Option<i32>,
    pub modifiers: Option<Vec<ModifierInput>>,
}

// ==================== 装备 ====================

/// 购买装备
///
/// fighter_id 与 vehicle_id 都为空时放入帮派仓库。
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuyEquipmentData {
    pub gang_id: i32,
    pub fighter_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub equipment_id: i32,
    pub manual_cost: Option<i32>,
    #[serde(default)]
    pub is_master_crafted: bool,
}

// ==================== 载具 ====================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuyVehicleData {
    pub vehicle_type_id: i32,
    pub vehicle_name: Option<String>,
    pub cost: Option<i32>,
    pub fighter_id: Option<i32>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateVehicleData {
    pub vehicle_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub fighter_id: Option<Option<i32>>,
}

// ==================== 战役 ====================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCampaignData {
    pub campaign_name: String,
    pub campaign_type_id: i32,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateCampaignData {
    pub campaign_name: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddMemberData {
    pub user_id: i32,
    pub role: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddCampaignGangData {
    pub gang_id: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddTerritoryData {
    pub territory_id: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssignTerritoryData {
    /// 为空表示释放领地
    pub gang_id: Option<i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordBattleData {
    pub attacker_id: Option<i32>,
    pub defender_id: Option<i32>,
    pub winner_id: Option<i32>,
    pub scenario: String,
    pub note: Option<String>,
}

// ==================== 管理后台 ====================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateProfileData {
    pub username: String,
    pub user_role: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GangTypeInput {
    pub gang_type: String,
    pub alignment: String,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GangLineageInput {
    pub name: String,
    pub lineage_type: String,
    pub gang_type_id: Option<i32>,
    pub fighter_type_id: Option<i32>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeaponProfileInput {
    pub profile_name: String,
    pub range_short: Option<String>,
    pub range_long: Option<String>,
    pub acc_short: Option<String>,
    pub acc_long: Option<String>,
    pub strength: Option<String>,
    pub ap: Option<String>,
    pub damage: Option<String>,
    pub ammo: Option<String>,
    pub traits: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VehicleProfileInput {
    pub upgrade_type: String,
    #[serde(default)]
    pub movement: i32,
    #[serde(default)]
    pub front: i32,
    #[serde(default)]
    pub side: i32,
    #[serde(default)]
    pub rear: i32,
    #[serde(default)]
    pub hull_points: i32,
    #[serde(default)]
    pub handling: i32,
    #[serde(default)]
    pub save: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiscountInput {
    pub gang_type_id: Option<i32>,
    pub fighter_type_id: Option<i32>,
    pub adjusted_cost: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AvailabilityInput {
    pub gang_type_id: i32,
    pub availability: String,
}

/// 创建或整体替换装备（PUT 时子表全部替换）
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EquipmentInput {
    pub equipment_name: String,
    pub equipment_category: String,
    pub equipment_type: String,
    pub cost: i32,
    pub availability: Option<String>,
    pub faction: Option<String>,
    #[serde(default)]
    pub core_equipment: bool,
    #[serde(default)]
    pub weapon_profiles: Vec<WeaponProfileInput>,
    pub vehicle_profile: Option<VehicleProfileInput>,
    #[serde(default)]
    pub discounts: Vec<DiscountInput>,
    #[serde(default)]
    pub availabilities: Vec<AvailabilityInput>,
    /// 购买时生成异兽的战士类型
    #[serde(default)]
    pub beast_fighter_type_ids: Vec<i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FighterTypeInput {
    pub fighter_type: String,
    pub gang_type_id: Option<i32>,
    pub fighter_class: String,
    pub cost: i32,
    #[serde(flatten)]
    pub stats: StatBlock,
    #[serde(default)]
    pub special_rules: Vec<String>,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub default_equipment_ids: Vec<i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VehicleTypeInput {
    pub vehicle_type: String,
    pub gang_type_id: Option<i32>,
    pub cost: i32,
    #[serde(default)]
    pub movement: i32,
    #[serde(default)]
    pub front: i32,
    #[serde(default)]
    pub side: i32,
    #[serde(default)]
    pub rear: i32,
    #[serde(default)]
    pub hull_points: i32,
    #[serde(default)]
    pub handling: i32,
    #[serde(default)]
    pub save: i32,
    #[serde(default)]
    pub body_slots: i32,
    #[serde(default)]
    pub drive_slots: i32,
    #[serde(default)]
    pub engine_slots: i32,
    #[serde(default)]
    pub special_rules: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TriumphInput {
    pub triumph: String,
    pub criteria: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignTypeInput {
    pub campaign_type_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub territories: Vec<String>,
    #[serde(default)]
    pub triumphs: Vec<TriumphInput>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EffectTypeInput {
    pub effect_name: String,
    pub effect_category: String,
    pub equipment_id: Option<i32>,
    #[serde(default)]
    pub credits_increase: i32,
    #[serde(default)]
    pub modifiers: Vec<ModifierInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_note_are_distinguished() {
        let missing: UpdateGangData = serde_json::from_str(r#"{"name":"Iron Saints"}"#).unwrap();
        assert_eq!(missing.note, None);

        let cleared: UpdateGangData = serde_json::from_str(r#"{"note":null}"#).unwrap();
        assert_eq!(cleared.note, Some(None));

        let set: UpdateGangData = serde_json::from_str(r#"{"note":"hold the dome"}"#).unwrap();
        assert_eq!(set.note, Some(Some("hold the dome".to_string())));
    }

    #[test]
    fn fighter_type_stats_are_flattened() {
        let input: FighterTypeInput = serde_json::from_str(
            r#"{"fighter_type":"Champion","gang_type_id":1,"fighter_class":"Champion",
                "cost":95,"movement":5,"weapon_skill":3,"toughness":3}"#,
        )
        .unwrap();
        assert_eq!(input.stats.movement, 5);
        assert_eq!(input.stats.toughness, 3);
        assert_eq!(input.stats.wounds, 0);
        assert!(input.default_equipment_ids.is_empty());
    }
}
