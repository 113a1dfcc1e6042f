//! 装备持有数据仓库
//!
//! 购买流程：价格计算 → 原子扣款 → 插入装备 → 授予效果 → 生成异兽 → 更新评分，
//! 全部在同一事务内完成，任何一步失败都会整体回滚。

use crate::database::dto::BuyEquipmentData;
use crate::database::pricing::{PurchasePrice, pick_discount, purchase_price};
use crate::database::repository::effects_repository::{
    EffectTarget, EffectWithModifiers, EffectsRepository,
};
use crate::database::repository::fighters_repository::FightersRepository;
use crate::database::repository::gangs_repository::{GangBalance, GangsRepository};
use crate::database::repository::rating_repository::RatingRepository;
use crate::entity::prelude::*;
use crate::entity::{
    equipment, equipment_beasts, equipment_discounts, fighter_defaults, fighter_effects,
    fighter_equipment, fighter_exotic_beasts, fighters, vehicles,
};
use crate::error::{AppError, AppResult};
use sea_orm::*;
use serde::{Deserialize, Serialize};

/// 购买结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseResult {
    pub equipment: fighter_equipment::Model,
    pub price: PurchasePrice,
    pub effects: Vec<EffectWithModifiers>,
    /// 生成的异兽
    pub beasts: Vec<fighters::Model>,
    pub rating_delta: i32,
    pub gang: GangBalance,
}

/// 删除装备的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovedEquipment {
    pub gang_id: i32,
    pub refund: i32,
    pub rating_delta: i32,
    /// 随装备删除的异兽
    pub removed_beasts: Vec<i32>,
    pub gang: GangBalance,
}

enum Target {
    Stash,
    Fighter(fighters::Model),
    Vehicle(vehicles::Model),
}

pub struct FighterEquipmentRepository;

impl FighterEquipmentRepository {
    // ==================== 查询操作 ====================

    pub async fn get<C>(conn: &C, id: i32) -> AppResult<fighter_equipment::Model>
    where
        C: ConnectionTrait,
    {
        FighterEquipment::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("装备记录 {}", id)))
    }

    /// 帮派仓库中的装备
    pub async fn list_stash<C>(
        conn: &C,
        gang_id: i32,
    ) -> Result<Vec<fighter_equipment::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        FighterEquipment::find()
            .filter(fighter_equipment::Column::GangId.eq(gang_id))
            .filter(fighter_equipment::Column::FighterId.is_null())
            .filter(fighter_equipment::Column::VehicleId.is_null())
            .order_by_asc(fighter_equipment::Column::Id)
            .all(conn)
            .await
    }

    // ==================== 发放 ====================

    /// 插入一条装备记录并创建其授予的效果
    async fn insert_item<C>(
        conn: &C,
        gang_id: i32,
        fighter_id: Option<i32>,
        vehicle_id: Option<i32>,
        item: &equipment::Model,
        purchase_cost: i32,
        is_master_crafted: bool,
    ) -> Result<(fighter_equipment::Model, Vec<EffectWithModifiers>), DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now().timestamp() as i32;
        let owned = fighter_equipment::ActiveModel {
            id: NotSet,
            gang_id: Set(gang_id),
            fighter_id: Set(fighter_id),
            vehicle_id: Set(vehicle_id),
            equipment_id: Set(item.id),
            purchase_cost: Set(purchase_cost),
            original_cost: Set(item.cost),
            is_master_crafted: Set(is_master_crafted),
            created_at: Set(Some(now)),
        }
        .insert(conn)
        .await?;

        let target = EffectTarget {
            fighter_id,
            vehicle_id,
            fighter_equipment_id: Some(owned.id),
        };
        let effects = EffectsRepository::insert_for_equipment(conn, item.id, target).await?;
        Ok((owned, effects))
    }

    /// 发放战士类型的默认装备（花费为 0）
    pub async fn grant_defaults<C>(
        conn: &C,
        gang_id: i32,
        fighter_id: i32,
        fighter_type_id: i32,
    ) -> Result<Vec<fighter_equipment::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let defaults = FighterDefaults::find()
            .filter(fighter_defaults::Column::FighterTypeId.eq(fighter_type_id))
            .order_by_asc(fighter_defaults::Column::Id)
            .find_also_related(Equipment)
            .all(conn)
            .await?;

        let mut granted = Vec::with_capacity(defaults.len());
        for (default, item) in defaults {
            let Some(item) = item else {
                log::warn!("默认装备 {} 指向不存在的装备", default.id);
                continue;
            };
            let (owned, _) =
                Self::insert_item(conn, gang_id, Some(fighter_id), None, &item, 0, false).await?;
            granted.push(owned);
        }
        Ok(granted)
    }

    // ==================== 购买 ====================

    /// 购买装备
    pub async fn purchase(
        db: &DatabaseConnection,
        data: BuyEquipmentData,
    ) -> AppResult<PurchaseResult> {
        if data.manual_cost.is_some_and(|c| c < 0) {
            return Err(AppError::bad_request("手动价格不能为负数"));
        }

        let txn = db.begin().await?;
        let gang = GangsRepository::get(&txn, data.gang_id).await?;
        let item = Equipment::find_by_id(data.equipment_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("装备 {}", data.equipment_id)))?;

        let target = match (data.fighter_id, data.vehicle_id) {
            (Some(_), Some(_)) => {
                return Err(AppError::bad_request("装备不能同时属于战士和载具"));
            }
            (Some(fighter_id), None) => {
                let fighter = FightersRepository::get(&txn, fighter_id).await?;
                if fighter.gang_id != gang.id {
                    return Err(AppError::bad_request("战士不属于该帮派"));
                }
                Target::Fighter(fighter)
            }
            (None, Some(vehicle_id)) => {
                let vehicle = Vehicles::find_by_id(vehicle_id)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("载具 {}", vehicle_id)))?;
                if vehicle.gang_id != gang.id {
                    return Err(AppError::bad_request("载具不属于该帮派"));
                }
                Target::Vehicle(vehicle)
            }
            (None, None) => Target::Stash,
        };

        // 价格：原价 → 折扣 → 手动覆盖 → 大师级
        let discounts = EquipmentDiscounts::find()
            .filter(equipment_discounts::Column::EquipmentId.eq(item.id))
            .all(&txn)
            .await?;
        let fighter_type_id = match &target {
            Target::Fighter(f) => Some(f.fighter_type_id),
            _ => None,
        };
        let discount = pick_discount(&discounts, gang.gang_type_id, fighter_type_id);
        if let Some(manual_cost) = data.manual_cost {
            GangsRepository::ensure_amount(manual_cost, "手动价格")?;
        }
        let price = purchase_price(
            item.cost,
            discount,
            data.manual_cost,
            item.is_weapon(),
            data.is_master_crafted,
        )
        .ok_or_else(|| AppError::bad_request("装备价格超出允许范围"))?;
        if price.final_cost < 0 {
            return Err(AppError::bad_request("装备价格不能为负数"));
        }

        GangsRepository::debit_credits(&txn, gang.id, price.final_cost).await?;

        let (fighter_id, vehicle_id) = match &target {
            Target::Fighter(f) => (Some(f.id), None),
            Target::Vehicle(v) => (None, Some(v.id)),
            Target::Stash => (None, None),
        };
        let (owned, effects) = Self::insert_item(
            &txn,
            gang.id,
            fighter_id,
            vehicle_id,
            &item,
            price.final_cost,
            price.master_crafted,
        )
        .await?;

        let counted = match &target {
            Target::Fighter(f) => f.is_active(),
            Target::Vehicle(v) => RatingRepository::vehicle_counts(&txn, v).await?,
            Target::Stash => false,
        };
        let mut rating_delta = if counted {
            price.final_cost
                + effects
                    .iter()
                    .map(|e| e.effect.credits_increase)
                    .sum::<i32>()
        } else {
            0
        };

        // 异兽只在装备给战士时生成
        let mut beasts = Vec::new();
        if let Target::Fighter(owner) = &target {
            let spawns = EquipmentBeasts::find()
                .filter(equipment_beasts::Column::EquipmentId.eq(item.id))
                .order_by_asc(equipment_beasts::Column::Id)
                .all(&txn)
                .await?;

            for spawn in spawns {
                let beast_type = FighterTypes::find_by_id(spawn.fighter_type_id)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("战士类型 {}", spawn.fighter_type_id)))?;

                let beast = FightersRepository::insert_from_type(
                    &txn,
                    &gang,
                    &beast_type,
                    beast_type.fighter_type.clone(),
                    beast_type.cost,
                )
                .await?;
                Self::grant_defaults(&txn, gang.id, beast.id, beast_type.id).await?;

                fighter_exotic_beasts::ActiveModel {
                    id: NotSet,
                    fighter_owner_id: Set(owner.id),
                    fighter_pet_id: Set(beast.id),
                    fighter_equipment_id: Set(Some(owned.id)),
                }
                .insert(&txn)
                .await?;

                // 目前恒为 0：异兽报价为 0，默认装备免费。rating_delta 已含装备与效果，这里只能加异兽自身部分
                rating_delta += RatingRepository::fighter_contribution(&txn, &beast).await?;
                beasts.push(beast);
            }
        }

        GangsRepository::adjust_rating(&txn, gang.id, rating_delta).await?;
        let balance = GangsRepository::balance(&txn, gang.id).await?;
        txn.commit().await?;

        log::info!(
            "帮派 {} 购买装备 {} ({})，花费 {}，评分 {:+}",
            gang.id,
            item.equipment_name,
            owned.id,
            price.final_cost,
            rating_delta
        );
        Ok(PurchaseResult {
            equipment: owned,
            price,
            effects,
            beasts,
            rating_delta,
            gang: balance,
        })
    }

    // ==================== 删除 ====================

    /// 删除装备
    ///
    /// 退还购买花费，扣减其贡献的评分（装备、授予的效果、生成的异兽）。
    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<RemovedEquipment> {
        let txn = db.begin().await?;
        let owned = Self::get(&txn, id).await?;

        let effects = FighterEffects::find()
            .filter(fighter_effects::Column::FighterEquipmentId.eq(owned.id))
            .all(&txn)
            .await?;
        let counted =
            RatingRepository::location_counts(&txn, owned.fighter_id, owned.vehicle_id).await?;
        let mut rating_removed = if counted {
            owned.purchase_cost + effects.iter().map(|e| e.credits_increase).sum::<i32>()
        } else {
            0
        };

        // 异兽先于装备删除，链接记录随装备级联
        let pet_ids: Vec<i32> = FighterExoticBeasts::find()
            .filter(fighter_exotic_beasts::Column::FighterEquipmentId.eq(owned.id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|link| link.fighter_pet_id)
            .collect();
        let mut removed_beasts = Vec::new();
        if !pet_ids.is_empty() {
            let pets = Fighters::find()
                .filter(fighters::Column::Id.is_in(pet_ids))
                .all(&txn)
                .await?;
            for pet in &pets {
                if removed_beasts.contains(&pet.id) {
                    continue;
                }
                let (ids, removed) = FightersRepository::remove_with_companions(&txn, pet).await?;
                rating_removed += removed;
                removed_beasts.extend(ids);
            }
        }

        FighterEffects::delete_many()
            .filter(fighter_effects::Column::FighterEquipmentId.eq(owned.id))
            .exec(&txn)
            .await?;
        FighterEquipment::delete_by_id(owned.id).exec(&txn).await?;

        GangsRepository::adjust_credits(&txn, owned.gang_id, owned.purchase_cost).await?;
        GangsRepository::adjust_rating(&txn, owned.gang_id, -rating_removed).await?;
        let balance = GangsRepository::balance(&txn, owned.gang_id).await?;
        txn.commit().await?;

        log::info!(
            "删除装备记录 {}，退还 {}，评分 {:+}",
            owned.id,
            owned.purchase_cost,
            -rating_removed
        );
        Ok(RemovedEquipment {
            gang_id: owned.gang_id,
            refund: owned.purchase_cost,
            rating_delta: -rating_removed,
            removed_beasts,
            gang: balance,
        })
    }
}
