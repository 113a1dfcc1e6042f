//! 帮派详情聚合
//!
//! 一次请求读取帮派相关的全部表，在内存中组装页面所需的视图：
//! 战士（装备、技能、效果、有效属性、乘坐的载具）、无乘员载具、仓库、战役。
//! 互不依赖的查询并发执行。

use std::collections::{HashMap, HashSet};

use crate::cache::{TagCache, gang_details_key, gang_tag};
use crate::database::pricing::{CostBreakdown, reported_credits};
use crate::database::repository::effects_repository::{EffectWithModifiers, EffectsRepository};
use crate::database::stats::{StatBlock, VehicleStats};
use crate::entity::prelude::*;
use crate::entity::{
    campaign_gangs, campaigns, equipment, fighter_effects, fighter_equipment,
    fighter_exotic_beasts, fighter_skills, fighter_types, fighters, gang_lineages, gang_types,
    gangs, vehicles, weapon_profiles,
};
use crate::error::{AppError, AppResult};
use sea_orm::*;
use serde::{Deserialize, Serialize};

/// 装备记录 + 装备目录信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentView {
    #[serde(flatten)]
    pub item: fighter_equipment::Model,
    pub equipment_name: String,
    pub equipment_category: String,
    pub equipment_type: String,
    pub weapon_profiles: Vec<weapon_profiles::Model>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleView {
    #[serde(flatten)]
    pub vehicle: vehicles::Model,
    pub effective_stats: VehicleStats,
    pub equipment: Vec<EquipmentView>,
    pub effects: Vec<EffectWithModifiers>,
    pub total_cost: i32,
}

/// 战士视图
///
/// `credits` 为对外显示的基础花费：作为异兽被拥有时为 0。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FighterView {
    #[serde(flatten)]
    pub fighter: fighters::Model,
    pub fighter_type: Option<String>,
    pub is_active: bool,
    /// 作为异兽时的主人
    pub owner_id: Option<i32>,
    pub cost: CostBreakdown,
    pub total_cost: i32,
    pub effective_stats: StatBlock,
    pub equipment: Vec<EquipmentView>,
    pub skills: Vec<fighter_skills::Model>,
    pub effects: Vec<EffectWithModifiers>,
    /// 该战士乘坐的载具
    pub vehicles: Vec<VehicleView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GangDetails {
    #[serde(flatten)]
    pub gang: gangs::Model,
    pub gang_type: Option<gang_types::Model>,
    pub lineage: Option<gang_lineages::Model>,
    pub fighters: Vec<FighterView>,
    /// 没有乘员的载具
    pub vehicles: Vec<VehicleView>,
    pub stash: Vec<EquipmentView>,
    pub campaigns: Vec<campaigns::Model>,
    /// 按当前数据重新计算的评分，正常情况下等于 `rating`
    pub computed_rating: i32,
}

pub struct DetailsRepository;

impl DetailsRepository {
    /// 读取帮派详情，优先使用缓存
    pub async fn gang_details_cached(
        db: &DatabaseConnection,
        cache: &TagCache<GangDetails>,
        gang_id: i32,
    ) -> AppResult<GangDetails> {
        let key = gang_details_key(gang_id);
        if let Some(details) = cache.get(&key) {
            log::debug!("帮派详情缓存命中: {}", gang_id);
            return Ok(details);
        }

        let tags = [gang_tag(gang_id)];
        let generation = cache.generation(&tags);
        let details = Self::gang_details(db, gang_id).await?;
        cache.insert_if_current(key, details.clone(), &tags, generation);
        Ok(details)
    }

    /// 从数据库组装帮派详情
    pub async fn gang_details(db: &DatabaseConnection, gang_id: i32) -> AppResult<GangDetails> {
        let (gang, fighters, vehicles, items, campaign_links) = tokio::try_join!(
            Gangs::find_by_id(gang_id).one(db),
            Fighters::find()
                .filter(fighters::Column::GangId.eq(gang_id))
                .order_by_asc(fighters::Column::Id)
                .all(db),
            Vehicles::find()
                .filter(vehicles::Column::GangId.eq(gang_id))
                .order_by_asc(vehicles::Column::Id)
                .all(db),
            FighterEquipment::find()
                .filter(fighter_equipment::Column::GangId.eq(gang_id))
                .order_by_asc(fighter_equipment::Column::Id)
                .all(db),
            CampaignGangs::find()
                .filter(campaign_gangs::Column::GangId.eq(gang_id))
                .all(db),
        )?;
        let gang = gang.ok_or_else(|| AppError::not_found(format!("帮派 {}", gang_id)))?;

        let fighter_ids: Vec<i32> = fighters.iter().map(|f| f.id).collect();
        let vehicle_ids: Vec<i32> = vehicles.iter().map(|v| v.id).collect();
        let equipment_ids: Vec<i32> = items
            .iter()
            .map(|i| i.equipment_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let type_ids: Vec<i32> = fighters
            .iter()
            .map(|f| f.fighter_type_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let campaign_ids: Vec<i32> = campaign_links.iter().map(|l| l.campaign_id).collect();
        let lineage_id = gang.gang_lineage_id;

        let (
            skills,
            effects,
            beast_links,
            catalog,
            profiles,
            fighter_types,
            campaigns,
            gang_type,
            lineage,
        ) = tokio::try_join!(
            FighterSkills::find()
                .filter(fighter_skills::Column::FighterId.is_in(fighter_ids.clone()))
                .order_by_asc(fighter_skills::Column::Id)
                .all(db),
            FighterEffects::find()
                .filter(
                    Condition::any()
                        .add(fighter_effects::Column::FighterId.is_in(fighter_ids.clone()))
                        .add(fighter_effects::Column::VehicleId.is_in(vehicle_ids.clone())),
                )
                .order_by_asc(fighter_effects::Column::Id)
                .all(db),
            FighterExoticBeasts::find()
                .filter(fighter_exotic_beasts::Column::FighterPetId.is_in(fighter_ids.clone()))
                .all(db),
            Equipment::find()
                .filter(equipment::Column::Id.is_in(equipment_ids.clone()))
                .all(db),
            WeaponProfiles::find()
                .filter(weapon_profiles::Column::WeaponId.is_in(equipment_ids))
                .order_by_asc(weapon_profiles::Column::SortOrder)
                .all(db),
            FighterTypes::find()
                .filter(fighter_types::Column::Id.is_in(type_ids))
                .all(db),
            Campaigns::find()
                .filter(campaigns::Column::Id.is_in(campaign_ids))
                .order_by_asc(campaigns::Column::Id)
                .all(db),
            GangTypes::find_by_id(gang.gang_type_id).one(db),
            async {
                match lineage_id {
                    Some(id) => GangLineages::find_by_id(id).one(db).await,
                    None => Ok(None),
                }
            },
        )?;

        let effects = EffectsRepository::with_modifiers(db, effects).await?;

        Ok(assemble(GangRows {
            gang,
            gang_type,
            lineage,
            fighters,
            vehicles,
            items,
            skills,
            effects,
            beast_links,
            catalog,
            profiles,
            fighter_types,
            campaigns,
        }))
    }
}

/// 组装视图所需的全部行
struct GangRows {
    gang: gangs::Model,
    gang_type: Option<gang_types::Model>,
    lineage: Option<gang_lineages::Model>,
    fighters: Vec<fighters::Model>,
    vehicles: Vec<vehicles::Model>,
    items: Vec<fighter_equipment::Model>,
    skills: Vec<fighter_skills::Model>,
    effects: Vec<EffectWithModifiers>,
    beast_links: Vec<fighter_exotic_beasts::Model>,
    catalog: Vec<equipment::Model>,
    profiles: Vec<weapon_profiles::Model>,
    fighter_types: Vec<fighter_types::Model>,
    campaigns: Vec<campaigns::Model>,
}

fn assemble(rows: GangRows) -> GangDetails {
    let catalog: HashMap<i32, equipment::Model> =
        rows.catalog.into_iter().map(|e| (e.id, e)).collect();
    let mut profiles: HashMap<i32, Vec<weapon_profiles::Model>> = HashMap::new();
    for profile in rows.profiles {
        profiles.entry(profile.weapon_id).or_default().push(profile);
    }
    let type_names: HashMap<i32, String> = rows
        .fighter_types
        .into_iter()
        .map(|t| (t.id, t.fighter_type))
        .collect();
    let owners: HashMap<i32, i32> = rows
        .beast_links
        .iter()
        .map(|l| (l.fighter_pet_id, l.fighter_owner_id))
        .collect();

    // 装备按位置分组
    let mut fighter_items: HashMap<i32, Vec<EquipmentView>> = HashMap::new();
    let mut vehicle_items: HashMap<i32, Vec<EquipmentView>> = HashMap::new();
    let mut stash = Vec::new();
    for item in rows.items {
        let Some(entry) = catalog.get(&item.equipment_id) else {
            log::warn!("装备记录 {} 指向不存在的装备 {}", item.id, item.equipment_id);
            continue;
        };
        let view = EquipmentView {
            equipment_name: entry.equipment_name.clone(),
            equipment_category: entry.equipment_category.clone(),
            equipment_type: entry.equipment_type.clone(),
            weapon_profiles: profiles.get(&entry.id).cloned().unwrap_or_default(),
            item,
        };
        match (view.item.fighter_id, view.item.vehicle_id) {
            (Some(fighter_id), _) => fighter_items.entry(fighter_id).or_default().push(view),
            (None, Some(vehicle_id)) => vehicle_items.entry(vehicle_id).or_default().push(view),
            (None, None) => stash.push(view),
        }
    }

    let mut fighter_effects: HashMap<i32, Vec<EffectWithModifiers>> = HashMap::new();
    let mut vehicle_effects: HashMap<i32, Vec<EffectWithModifiers>> = HashMap::new();
    for effect in rows.effects {
        match (effect.effect.fighter_id, effect.effect.vehicle_id) {
            (Some(fighter_id), _) => fighter_effects.entry(fighter_id).or_default().push(effect),
            (None, Some(vehicle_id)) => vehicle_effects.entry(vehicle_id).or_default().push(effect),
            (None, None) => {}
        }
    }

    let mut skills: HashMap<i32, Vec<fighter_skills::Model>> = HashMap::new();
    for skill in rows.skills {
        skills.entry(skill.fighter_id).or_default().push(skill);
    }

    // 载具视图，按乘员分组
    let mut crewed: HashMap<i32, Vec<VehicleView>> = HashMap::new();
    let mut uncrewed = Vec::new();
    for vehicle in rows.vehicles {
        let equipment = vehicle_items.remove(&vehicle.id).unwrap_or_default();
        let effects = vehicle_effects.remove(&vehicle.id).unwrap_or_default();
        let total_cost = vehicle.cost
            + equipment.iter().map(|e| e.item.purchase_cost).sum::<i32>()
            + effects.iter().map(|e| e.effect.credits_increase).sum::<i32>();
        let effective_stats = VehicleStats::from(&vehicle)
            .apply(effects.iter().flat_map(|e| e.stat_modifiers()));

        let view = VehicleView {
            effective_stats,
            equipment,
            effects,
            total_cost,
            vehicle,
        };
        match view.vehicle.fighter_id {
            Some(fighter_id) => crewed.entry(fighter_id).or_default().push(view),
            None => uncrewed.push(view),
        }
    }

    let mut computed_rating = 0;
    let mut fighters = Vec::with_capacity(rows.fighters.len());
    for mut fighter in rows.fighters {
        let equipment = fighter_items.remove(&fighter.id).unwrap_or_default();
        let effects = fighter_effects.remove(&fighter.id).unwrap_or_default();
        let skills = skills.remove(&fighter.id).unwrap_or_default();
        let vehicles = crewed.remove(&fighter.id).unwrap_or_default();
        let owner_id = owners.get(&fighter.id).copied();

        let cost = CostBreakdown {
            credits: reported_credits(fighter.credits, owner_id.is_some()),
            cost_adjustment: fighter.cost_adjustment,
            equipment: equipment.iter().map(|e| e.item.purchase_cost).sum(),
            skills: skills.iter().map(|s| s.credits_increase).sum(),
            effects: effects.iter().map(|e| e.effect.credits_increase).sum(),
            vehicles: vehicles.iter().map(|v| v.total_cost).sum(),
        };
        let total_cost = cost.total();
        let is_active = fighter.is_active();
        if is_active {
            computed_rating += total_cost;
        }

        let effective_stats =
            StatBlock::from(&fighter).apply(effects.iter().flat_map(|e| e.stat_modifiers()));
        fighter.credits = cost.credits;

        fighters.push(FighterView {
            fighter_type: type_names.get(&fighter.fighter_type_id).cloned(),
            is_active,
            owner_id,
            cost,
            total_cost,
            effective_stats,
            equipment,
            skills,
            effects,
            vehicles,
            fighter,
        });
    }

    GangDetails {
        gang: rows.gang,
        gang_type: rows.gang_type,
        lineage: rows.lineage,
        fighters,
        vehicles: uncrewed,
        stash,
        campaigns: rows.campaigns,
        computed_rating,
    }
}
