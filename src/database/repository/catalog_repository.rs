//! 参考数据仓库（管理后台）
//!
//! 装备、战士类型、载具类型、帮派类型、效果类型。
//! 带子表的记录在更新时整体替换子表。

use crate::database::dto::{
    EffectTypeInput, EquipmentInput, FighterTypeInput, GangTypeInput, VehicleTypeInput,
};
use crate::entity::prelude::*;
use crate::entity::{
    equipment, equipment_availability, equipment_beasts, equipment_discounts, fighter_defaults,
    fighter_effect_type_modifiers, fighter_effect_types, fighter_types, fighters, gang_types,
    gangs, vehicle_equipment_profiles, vehicle_types, vehicles, weapon_profiles,
};
use crate::database::repository::gangs_repository::GangsRepository;
use crate::error::{AppError, AppResult};
use sea_orm::*;
use serde::{Deserialize, Serialize};

const EQUIPMENT_TYPES: [&str; 3] = [
    equipment::TYPE_WEAPON,
    equipment::TYPE_WARGEAR,
    equipment::TYPE_VEHICLE_UPGRADE,
];
const UPGRADE_TYPES: [&str; 3] = ["body", "drive", "engine"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectTypeDetails {
    #[serde(flatten)]
    pub effect_type: fighter_effect_types::Model,
    pub modifiers: Vec<fighter_effect_type_modifiers::Model>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentDetails {
    #[serde(flatten)]
    pub equipment: equipment::Model,
    pub weapon_profiles: Vec<weapon_profiles::Model>,
    pub vehicle_profile: Option<vehicle_equipment_profiles::Model>,
    pub discounts: Vec<equipment_discounts::Model>,
    pub availabilities: Vec<equipment_availability::Model>,
    pub effect_types: Vec<EffectTypeDetails>,
    pub beasts: Vec<equipment_beasts::Model>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FighterTypeDetails {
    #[serde(flatten)]
    pub fighter_type: fighter_types::Model,
    pub default_equipment: Vec<fighter_defaults::Model>,
}

/// 装备列表筛选
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentFilter {
    pub equipment_type: Option<String>,
    pub equipment_category: Option<String>,
}

pub struct CatalogRepository;

impl CatalogRepository {
    // ==================== 帮派类型 ====================

    pub async fn list_gang_types(
        db: &DatabaseConnection,
        include_hidden: bool,
    ) -> Result<Vec<gang_types::Model>, DbErr> {
        let mut query = GangTypes::find();
        if !include_hidden {
            query = query.filter(gang_types::Column::IsHidden.eq(false));
        }
        query.order_by_asc(gang_types::Column::GangType).all(db).await
    }

    pub async fn create_gang_type(
        db: &DatabaseConnection,
        input: GangTypeInput,
    ) -> AppResult<gang_types::Model> {
        if input.gang_type.trim().is_empty() {
            return Err(AppError::bad_request("帮派类型名称不能为空"));
        }
        Ok(gang_types::ActiveModel {
            id: NotSet,
            gang_type: Set(input.gang_type.trim().to_string()),
            alignment: Set(input.alignment),
            is_hidden: Set(input.is_hidden),
        }
        .insert(db)
        .await?)
    }

    pub async fn update_gang_type(
        db: &DatabaseConnection,
        id: i32,
        input: GangTypeInput,
    ) -> AppResult<gang_types::Model> {
        GangTypes::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("帮派类型 {}", id)))?;
        Ok(gang_types::ActiveModel {
            id: Set(id),
            gang_type: Set(input.gang_type.trim().to_string()),
            alignment: Set(input.alignment),
            is_hidden: Set(input.is_hidden),
        }
        .update(db)
        .await?)
    }

    pub async fn delete_gang_type(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let in_use = Gangs::find()
            .filter(gangs::Column::GangTypeId.eq(id))
            .count(db)
            .await?;
        if in_use > 0 {
            return Err(AppError::bad_request("仍有帮派使用该类型，无法删除"));
        }
        let result = GangTypes::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("帮派类型 {}", id)));
        }
        Ok(())
    }

    // ==================== 装备 ====================

    pub async fn list_equipment(
        db: &DatabaseConnection,
        filter: EquipmentFilter,
    ) -> Result<Vec<equipment::Model>, DbErr> {
        let mut query = Equipment::find();
        if let Some(equipment_type) = filter.equipment_type {
            query = query.filter(equipment::Column::EquipmentType.eq(equipment_type));
        }
        if let Some(category) = filter.equipment_category {
            query = query.filter(equipment::Column::EquipmentCategory.eq(category));
        }
        query
            .order_by_asc(equipment::Column::EquipmentCategory)
            .order_by_asc(equipment::Column::EquipmentName)
            .all(db)
            .await
    }

    pub async fn equipment_details<C>(conn: &C, id: i32) -> AppResult<EquipmentDetails>
    where
        C: ConnectionTrait,
    {
        let item = Equipment::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("装备 {}", id)))?;

        let weapon_profiles = WeaponProfiles::find()
            .filter(weapon_profiles::Column::WeaponId.eq(id))
            .order_by_asc(weapon_profiles::Column::SortOrder)
            .all(conn)
            .await?;
        let vehicle_profile = VehicleEquipmentProfiles::find()
            .filter(vehicle_equipment_profiles::Column::EquipmentId.eq(id))
            .one(conn)
            .await?;
        let discounts = EquipmentDiscounts::find()
            .filter(equipment_discounts::Column::EquipmentId.eq(id))
            .all(conn)
            .await?;
        let availabilities = EquipmentAvailability::find()
            .filter(equipment_availability::Column::EquipmentId.eq(id))
            .all(conn)
            .await?;
        let beasts = EquipmentBeasts::find()
            .filter(equipment_beasts::Column::EquipmentId.eq(id))
            .all(conn)
            .await?;

        let mut effect_types = Vec::new();
        for effect_type in FighterEffectTypes::find()
            .filter(fighter_effect_types::Column::EquipmentId.eq(id))
            .order_by_asc(fighter_effect_types::Column::Id)
            .all(conn)
            .await?
        {
            effect_types.push(Self::with_type_modifiers(conn, effect_type).await?);
        }

        Ok(EquipmentDetails {
            equipment: item,
            weapon_profiles,
            vehicle_profile,
            discounts,
            availabilities,
            effect_types,
            beasts,
        })
    }

    fn validate_equipment(input: &EquipmentInput) -> AppResult<()> {
        if input.equipment_name.trim().is_empty() {
            return Err(AppError::bad_request("装备名称不能为空"));
        }
        if !EQUIPMENT_TYPES.contains(&input.equipment_type.as_str()) {
            return Err(AppError::bad_request(format!(
                "无效的装备类型: {}",
                input.equipment_type
            )));
        }
        if input.cost < 0 {
            return Err(AppError::bad_request("装备价格不能为负数"));
        }
        GangsRepository::ensure_amount(input.cost, "装备价格")?;
        for discount in &input.discounts {
            if discount.adjusted_cost < 0 {
                return Err(AppError::bad_request("折扣价格不能为负数"));
            }
            GangsRepository::ensure_amount(discount.adjusted_cost, "折扣价格")?;
        }
        if let Some(profile) = &input.vehicle_profile {
            if !UPGRADE_TYPES.contains(&profile.upgrade_type.as_str()) {
                return Err(AppError::bad_request(format!(
                    "无效的载具升级类型: {}",
                    profile.upgrade_type
                )));
            }
        }
        Ok(())
    }

    /// 插入装备的子表
    ///
    /// 可用性记录插入失败时只记录警告，不影响装备本身的创建。
    async fn insert_equipment_children<C>(
        conn: &C,
        equipment_id: i32,
        input: &EquipmentInput,
    ) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        for profile in &input.weapon_profiles {
            weapon_profiles::ActiveModel {
                id: NotSet,
                weapon_id: Set(equipment_id),
                profile_name: Set(profile.profile_name.clone()),
                range_short: Set(profile.range_short.clone()),
                range_long: Set(profile.range_long.clone()),
                acc_short: Set(profile.acc_short.clone()),
                acc_long: Set(profile.acc_long.clone()),
                strength: Set(profile.strength.clone()),
                ap: Set(profile.ap.clone()),
                damage: Set(profile.damage.clone()),
                ammo: Set(profile.ammo.clone()),
                traits: Set(profile.traits.clone()),
                sort_order: Set(profile.sort_order),
            }
            .insert(conn)
            .await?;
        }

        if let Some(profile) = &input.vehicle_profile {
            vehicle_equipment_profiles::ActiveModel {
                id: NotSet,
                equipment_id: Set(equipment_id),
                upgrade_type: Set(profile.upgrade_type.clone()),
                movement: Set(profile.movement),
                front: Set(profile.front),
                side: Set(profile.side),
                rear: Set(profile.rear),
                hull_points: Set(profile.hull_points),
                handling: Set(profile.handling),
                save: Set(profile.save),
            }
            .insert(conn)
            .await?;
        }

        for discount in &input.discounts {
            equipment_discounts::ActiveModel {
                id: NotSet,
                equipment_id: Set(equipment_id),
                gang_type_id: Set(discount.gang_type_id),
                fighter_type_id: Set(discount.fighter_type_id),
                adjusted_cost: Set(discount.adjusted_cost),
            }
            .insert(conn)
            .await?;
        }

        for availability in &input.availabilities {
            let result = equipment_availability::ActiveModel {
                id: NotSet,
                equipment_id: Set(equipment_id),
                gang_type_id: Set(availability.gang_type_id),
                availability: Set(availability.availability.clone()),
            }
            .insert(conn)
            .await;
            if let Err(e) = result {
                log::warn!(
                    "装备 {} 的可用性记录（帮派类型 {}）写入失败，已跳过: {}",
                    equipment_id,
                    availability.gang_type_id,
                    e
                );
            }
        }

        for fighter_type_id in &input.beast_fighter_type_ids {
            equipment_beasts::ActiveModel {
                id: NotSet,
                equipment_id: Set(equipment_id),
                fighter_type_id: Set(*fighter_type_id),
            }
            .insert(conn)
            .await?;
        }
        Ok(())
    }

    /// 创建装备及其子表
    pub async fn create_equipment(
        db: &DatabaseConnection,
        input: EquipmentInput,
    ) -> AppResult<EquipmentDetails> {
        Self::validate_equipment(&input)?;

        let txn = db.begin().await?;
        let now = chrono::Utc::now().timestamp() as i32;
        let item = equipment::ActiveModel {
            id: NotSet,
            equipment_name: Set(input.equipment_name.trim().to_string()),
            equipment_category: Set(input.equipment_category.clone()),
            equipment_type: Set(input.equipment_type.clone()),
            cost: Set(input.cost),
            availability: Set(input.availability.clone()),
            faction: Set(input.faction.clone()),
            core_equipment: Set(input.core_equipment),
            created_at: Set(Some(now)),
        }
        .insert(&txn)
        .await?;

        Self::insert_equipment_children(&txn, item.id, &input).await?;
        let details = Self::equipment_details(&txn, item.id).await?;
        txn.commit().await?;

        log::info!("创建装备 {} ({})", item.equipment_name, item.id);
        Ok(details)
    }

    /// 整体替换装备及其子表（授予的效果类型不受影响）
    pub async fn replace_equipment(
        db: &DatabaseConnection,
        id: i32,
        input: EquipmentInput,
    ) -> AppResult<EquipmentDetails> {
        Self::validate_equipment(&input)?;

        let txn = db.begin().await?;
        Equipment::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("装备 {}", id)))?;

        equipment::ActiveModel {
            id: Set(id),
            equipment_name: Set(input.equipment_name.trim().to_string()),
            equipment_category: Set(input.equipment_category.clone()),
            equipment_type: Set(input.equipment_type.clone()),
            cost: Set(input.cost),
            availability: Set(input.availability.clone()),
            faction: Set(input.faction.clone()),
            core_equipment: Set(input.core_equipment),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        WeaponProfiles::delete_many()
            .filter(weapon_profiles::Column::WeaponId.eq(id))
            .exec(&txn)
            .await?;
        VehicleEquipmentProfiles::delete_many()
            .filter(vehicle_equipment_profiles::Column::EquipmentId.eq(id))
            .exec(&txn)
            .await?;
        EquipmentDiscounts::delete_many()
            .filter(equipment_discounts::Column::EquipmentId.eq(id))
            .exec(&txn)
            .await?;
        EquipmentAvailability::delete_many()
            .filter(equipment_availability::Column::EquipmentId.eq(id))
            .exec(&txn)
            .await?;
        EquipmentBeasts::delete_many()
            .filter(equipment_beasts::Column::EquipmentId.eq(id))
            .exec(&txn)
            .await?;

        Self::insert_equipment_children(&txn, id, &input).await?;
        let details = Self::equipment_details(&txn, id).await?;
        txn.commit().await?;
        Ok(details)
    }

    pub async fn delete_equipment(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let owned = FighterEquipment::find()
            .filter(crate::entity::fighter_equipment::Column::EquipmentId.eq(id))
            .count(db)
            .await?;
        if owned > 0 {
            return Err(AppError::bad_request("仍有帮派持有该装备，无法删除"));
        }
        let result = Equipment::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("装备 {}", id)));
        }
        Ok(())
    }

    // ==================== 战士类型 ====================

    pub async fn list_fighter_types(
        db: &DatabaseConnection,
        gang_type_id: Option<i32>,
        include_hidden: bool,
    ) -> Result<Vec<fighter_types::Model>, DbErr> {
        let mut query = FighterTypes::find();
        if let Some(gang_type_id) = gang_type_id {
            query = query.filter(
                Condition::any()
                    .add(fighter_types::Column::GangTypeId.eq(gang_type_id))
                    .add(fighter_types::Column::GangTypeId.is_null()),
            );
        }
        if !include_hidden {
            query = query.filter(fighter_types::Column::IsHidden.eq(false));
        }
        query
            .order_by_asc(fighter_types::Column::Cost)
            .all(db)
            .await
    }

    pub async fn fighter_type_details<C>(conn: &C, id: i32) -> AppResult<FighterTypeDetails>
    where
        C: ConnectionTrait,
    {
        let fighter_type = FighterTypes::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("战士类型 {}", id)))?;
        let default_equipment = FighterDefaults::find()
            .filter(fighter_defaults::Column::FighterTypeId.eq(id))
            .order_by_asc(fighter_defaults::Column::Id)
            .all(conn)
            .await?;
        Ok(FighterTypeDetails {
            fighter_type,
            default_equipment,
        })
    }

    async fn replace_fighter_defaults<C>(
        conn: &C,
        fighter_type_id: i32,
        equipment_ids: &[i32],
    ) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        FighterDefaults::delete_many()
            .filter(fighter_defaults::Column::FighterTypeId.eq(fighter_type_id))
            .exec(conn)
            .await?;
        for equipment_id in equipment_ids {
            fighter_defaults::ActiveModel {
                id: NotSet,
                fighter_type_id: Set(fighter_type_id),
                equipment_id: Set(*equipment_id),
            }
            .insert(conn)
            .await?;
        }
        Ok(())
    }

    fn fighter_type_model(input: &FighterTypeInput) -> AppResult<fighter_types::ActiveModel> {
        if input.fighter_type.trim().is_empty() {
            return Err(AppError::bad_request("战士类型名称不能为空"));
        }
        if input.cost < 0 {
            return Err(AppError::bad_request("战士类型花费不能为负数"));
        }
        GangsRepository::ensure_amount(input.cost, "战士类型花费")?;
        let stats = input.stats;
        Ok(fighter_types::ActiveModel {
            id: NotSet,
            fighter_type: Set(input.fighter_type.trim().to_string()),
            gang_type_id: Set(input.gang_type_id),
            fighter_class: Set(input.fighter_class.clone()),
            cost: Set(input.cost),
            movement: Set(stats.movement),
            weapon_skill: Set(stats.weapon_skill),
            ballistic_skill: Set(stats.ballistic_skill),
            strength: Set(stats.strength),
            toughness: Set(stats.toughness),
            wounds: Set(stats.wounds),
            initiative: Set(stats.initiative),
            attacks: Set(stats.attacks),
            leadership: Set(stats.leadership),
            cool: Set(stats.cool),
            willpower: Set(stats.willpower),
            intelligence: Set(stats.intelligence),
            special_rules: Set(Some(input.special_rules.clone().into())),
            is_hidden: Set(input.is_hidden),
        })
    }

    pub async fn create_fighter_type(
        db: &DatabaseConnection,
        input: FighterTypeInput,
    ) -> AppResult<FighterTypeDetails> {
        let model = Self::fighter_type_model(&input)?;
        let txn = db.begin().await?;
        let created = model.insert(&txn).await?;
        Self::replace_fighter_defaults(&txn, created.id, &input.default_equipment_ids).await?;
        let details = Self::fighter_type_details(&txn, created.id).await?;
        txn.commit().await?;
        Ok(details)
    }

    /// 更新战士类型，已雇佣的战士不受影响
    pub async fn update_fighter_type(
        db: &DatabaseConnection,
        id: i32,
        input: FighterTypeInput,
    ) -> AppResult<FighterTypeDetails> {
        let mut model = Self::fighter_type_model(&input)?;
        model.id = Set(id);

        let txn = db.begin().await?;
        FighterTypes::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("战士类型 {}", id)))?;
        model.update(&txn).await?;
        Self::replace_fighter_defaults(&txn, id, &input.default_equipment_ids).await?;
        let details = Self::fighter_type_details(&txn, id).await?;
        txn.commit().await?;
        Ok(details)
    }

    pub async fn delete_fighter_type(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let in_use = Fighters::find()
            .filter(fighters::Column::FighterTypeId.eq(id))
            .count(db)
            .await?;
        if in_use > 0 {
            return Err(AppError::bad_request("仍有战士使用该类型，无法删除"));
        }
        let result = FighterTypes::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("战士类型 {}", id)));
        }
        Ok(())
    }

    // ==================== 载具类型 ====================

    pub async fn list_vehicle_types(
        db: &DatabaseConnection,
        gang_type_id: Option<i32>,
    ) -> Result<Vec<vehicle_types::Model>, DbErr> {
        let mut query = VehicleTypes::find();
        if let Some(gang_type_id) = gang_type_id {
            query = query.filter(
                Condition::any()
                    .add(vehicle_types::Column::GangTypeId.eq(gang_type_id))
                    .add(vehicle_types::Column::GangTypeId.is_null()),
            );
        }
        query
            .order_by_asc(vehicle_types::Column::VehicleType)
            .all(db)
            .await
    }

    fn vehicle_type_model(input: VehicleTypeInput) -> AppResult<vehicle_types::ActiveModel> {
        if input.vehicle_type.trim().is_empty() {
            return Err(AppError::bad_request("载具类型名称不能为空"));
        }
        if input.cost < 0 {
            return Err(AppError::bad_request("载具类型花费不能为负数"));
        }
        GangsRepository::ensure_amount(input.cost, "载具类型花费")?;
        Ok(vehicle_types::ActiveModel {
            id: NotSet,
            vehicle_type: Set(input.vehicle_type.trim().to_string()),
            gang_type_id: Set(input.gang_type_id),
            cost: Set(input.cost),
            movement: Set(input.movement),
            front: Set(input.front),
            side: Set(input.side),
            rear: Set(input.rear),
            hull_points: Set(input.hull_points),
            handling: Set(input.handling),
            save: Set(input.save),
            body_slots: Set(input.body_slots),
            drive_slots: Set(input.drive_slots),
            engine_slots: Set(input.engine_slots),
            special_rules: Set(Some(input.special_rules.into())),
        })
    }

    pub async fn create_vehicle_type(
        db: &DatabaseConnection,
        input: VehicleTypeInput,
    ) -> AppResult<vehicle_types::Model> {
        Ok(Self::vehicle_type_model(input)?.insert(db).await?)
    }

    pub async fn update_vehicle_type(
        db: &DatabaseConnection,
        id: i32,
        input: VehicleTypeInput,
    ) -> AppResult<vehicle_types::Model> {
        VehicleTypes::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("载具类型 {}", id)))?;
        let mut model = Self::vehicle_type_model(input)?;
        model.id = Set(id);
        Ok(model.update(db).await?)
    }

    pub async fn delete_vehicle_type(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let in_use = Vehicles::find()
            .filter(vehicles::Column::VehicleTypeId.eq(id))
            .count(db)
            .await?;
        if in_use > 0 {
            return Err(AppError::bad_request("仍有载具使用该类型，无法删除"));
        }
        let result = VehicleTypes::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("载具类型 {}", id)));
        }
        Ok(())
    }

    // ==================== 效果类型 ====================

    async fn with_type_modifiers<C>(
        conn: &C,
        effect_type: fighter_effect_types::Model,
    ) -> Result<EffectTypeDetails, DbErr>
    where
        C: ConnectionTrait,
    {
        let modifiers = FighterEffectTypeModifiers::find()
            .filter(fighter_effect_type_modifiers::Column::FighterEffectTypeId.eq(effect_type.id))
            .order_by_asc(fighter_effect_type_modifiers::Column::Id)
            .all(conn)
            .await?;
        Ok(EffectTypeDetails {
            effect_type,
            modifiers,
        })
    }

    pub async fn list_effect_types(
        db: &DatabaseConnection,
        category: Option<String>,
    ) -> Result<Vec<EffectTypeDetails>, DbErr> {
        let mut query = FighterEffectTypes::find();
        if let Some(category) = category {
            query = query.filter(fighter_effect_types::Column::EffectCategory.eq(category));
        }
        let effect_types = query
            .order_by_asc(fighter_effect_types::Column::EffectName)
            .all(db)
            .await?;

        let mut details = Vec::with_capacity(effect_types.len());
        for effect_type in effect_types {
            details.push(Self::with_type_modifiers(db, effect_type).await?);
        }
        Ok(details)
    }

    async fn replace_type_modifiers<C>(
        conn: &C,
        effect_type_id: i32,
        input: &EffectTypeInput,
    ) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        FighterEffectTypeModifiers::delete_many()
            .filter(fighter_effect_type_modifiers::Column::FighterEffectTypeId.eq(effect_type_id))
            .exec(conn)
            .await?;
        for modifier in &input.modifiers {
            fighter_effect_type_modifiers::ActiveModel {
                id: NotSet,
                fighter_effect_type_id: Set(effect_type_id),
                stat_name: Set(modifier.stat_name.clone()),
                default_numeric_value: Set(modifier.numeric_value),
            }
            .insert(conn)
            .await?;
        }
        Ok(())
    }

    pub async fn create_effect_type(
        db: &DatabaseConnection,
        input: EffectTypeInput,
    ) -> AppResult<EffectTypeDetails> {
        if input.effect_name.trim().is_empty() {
            return Err(AppError::bad_request("效果名称不能为空"));
        }
        GangsRepository::ensure_amount(input.credits_increase, "效果花费")?;
        let txn = db.begin().await?;
        let created = fighter_effect_types::ActiveModel {
            id: NotSet,
            effect_name: Set(input.effect_name.trim().to_string()),
            effect_category: Set(input.effect_category.clone()),
            equipment_id: Set(input.equipment_id),
            credits_increase: Set(input.credits_increase),
        }
        .insert(&txn)
        .await?;
        Self::replace_type_modifiers(&txn, created.id, &input).await?;
        let details = Self::with_type_modifiers(&txn, created).await?;
        txn.commit().await?;
        Ok(details)
    }

    /// 更新效果类型，已创建的效果实例不受影响
    pub async fn update_effect_type(
        db: &DatabaseConnection,
        id: i32,
        input: EffectTypeInput,
    ) -> AppResult<EffectTypeDetails> {
        if input.effect_name.trim().is_empty() {
            return Err(AppError::bad_request("效果名称不能为空"));
        }
        GangsRepository::ensure_amount(input.credits_increase, "效果花费")?;
        let txn = db.begin().await?;
        FighterEffectTypes::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("效果类型 {}", id)))?;
        let updated = fighter_effect_types::ActiveModel {
            id: Set(id),
            effect_name: Set(input.effect_name.trim().to_string()),
            effect_category: Set(input.effect_category.clone()),
            equipment_id: Set(input.equipment_id),
            credits_increase: Set(input.credits_increase),
        }
        .update(&txn)
        .await?;
        Self::replace_type_modifiers(&txn, id, &input).await?;
        let details = Self::with_type_modifiers(&txn, updated).await?;
        txn.commit().await?;
        Ok(details)
    }

    pub async fn delete_effect_type(db: &DatabaseConnection, id: i32) -> AppResult<()> {
        let result = FighterEffectTypes::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("效果类型 {}", id)));
        }
        Ok(())
    }
}
