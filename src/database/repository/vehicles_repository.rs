//! 载具数据仓库
//!
//! 载具只有在有在役乘员时才计入评分，分配或取消乘员会让评分随之移动。

use crate::database::dto::{AddEffectData, BuyVehicleData, UpdateVehicleData};
use crate::database::repository::effects_repository::{
    EffectTarget, EffectWithModifiers, EffectsRepository,
};
use crate::database::repository::fighters_repository::FightersRepository;
use crate::database::repository::gangs_repository::{GangBalance, GangsRepository};
use crate::database::repository::rating_repository::RatingRepository;
use crate::database::stats::VehicleStats;
use crate::entity::prelude::*;
use crate::entity::{fighter_effects, fighter_equipment, vehicles};
use crate::error::{AppError, AppResult};
use sea_orm::*;
use serde::{Deserialize, Serialize};

/// 购买载具的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehiclePurchase {
    pub vehicle: vehicles::Model,
    pub rating_delta: i32,
    pub gang: GangBalance,
}

pub struct VehiclesRepository;

impl VehiclesRepository {
    pub async fn get<C>(conn: &C, id: i32) -> AppResult<vehicles::Model>
    where
        C: ConnectionTrait,
    {
        Vehicles::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("载具 {}", id)))
    }

    /// 校验乘员属于同一帮派
    async fn check_crew<C>(conn: &C, gang_id: i32, fighter_id: Option<i32>) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        if let Some(fighter_id) = fighter_id {
            let fighter = FightersRepository::get(conn, fighter_id).await?;
            if fighter.gang_id != gang_id {
                return Err(AppError::bad_request("乘员不属于该帮派"));
            }
        }
        Ok(())
    }

    /// 载具对评分的贡献：不计入时为 0
    async fn contribution<C>(conn: &C, vehicle: &vehicles::Model) -> Result<i32, DbErr>
    where
        C: ConnectionTrait,
    {
        if RatingRepository::vehicle_counts(conn, vehicle).await? {
            RatingRepository::vehicle_total(conn, vehicle).await
        } else {
            Ok(0)
        }
    }

    /// 购买载具
    pub async fn buy(
        db: &DatabaseConnection,
        gang_id: i32,
        data: BuyVehicleData,
    ) -> AppResult<VehiclePurchase> {
        let txn = db.begin().await?;
        let gang = GangsRepository::get(&txn, gang_id).await?;
        let vehicle_type = VehicleTypes::find_by_id(data.vehicle_type_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("载具类型 {}", data.vehicle_type_id)))?;
        Self::check_crew(&txn, gang.id, data.fighter_id).await?;

        let cost = data.cost.unwrap_or(vehicle_type.cost);
        GangsRepository::ensure_amount(cost, "载具花费")?;
        GangsRepository::debit_credits(&txn, gang.id, cost).await?;

        let stats = VehicleStats::from(&vehicle_type);
        let now = chrono::Utc::now().timestamp() as i32;
        let vehicle = vehicles::ActiveModel {
            id: NotSet,
            gang_id: Set(gang.id),
            fighter_id: Set(data.fighter_id),
            vehicle_type_id: Set(vehicle_type.id),
            vehicle_name: Set(data
                .vehicle_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| vehicle_type.vehicle_type.clone())),
            cost: Set(cost),
            movement: Set(stats.movement),
            front: Set(stats.front),
            side: Set(stats.side),
            rear: Set(stats.rear),
            hull_points: Set(stats.hull_points),
            handling: Set(stats.handling),
            save: Set(stats.save),
            body_slots: Set(vehicle_type.body_slots),
            drive_slots: Set(vehicle_type.drive_slots),
            engine_slots: Set(vehicle_type.engine_slots),
            created_at: Set(Some(now)),
        }
        .insert(&txn)
        .await?;

        let rating_delta = Self::contribution(&txn, &vehicle).await?;
        GangsRepository::adjust_rating(&txn, gang.id, rating_delta).await?;
        let balance = GangsRepository::balance(&txn, gang.id).await?;
        txn.commit().await?;

        log::info!(
            "帮派 {} 购买载具 {} ({})，花费 {}",
            gang.id,
            vehicle.vehicle_name,
            vehicle.id,
            cost
        );
        Ok(VehiclePurchase {
            vehicle,
            rating_delta,
            gang: balance,
        })
    }

    /// 重命名、分配或取消乘员
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        updates: UpdateVehicleData,
    ) -> AppResult<vehicles::Model> {
        let txn = db.begin().await?;
        let before = Self::get(&txn, id).await?;
        if let Some(fighter_id) = updates.fighter_id {
            Self::check_crew(&txn, before.gang_id, fighter_id).await?;
        }
        let vehicle_name = updates.vehicle_name.filter(|n| !n.trim().is_empty());
        if vehicle_name.is_none() && updates.fighter_id.is_none() {
            return Ok(before);
        }
        let before_contribution = Self::contribution(&txn, &before).await?;

        let after = vehicles::ActiveModel {
            id: Set(id),
            vehicle_name: vehicle_name.map_or(NotSet, Set),
            fighter_id: updates.fighter_id.map_or(NotSet, Set),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        let after_contribution = Self::contribution(&txn, &after).await?;
        GangsRepository::adjust_rating(
            &txn,
            after.gang_id,
            after_contribution - before_contribution,
        )
        .await?;
        txn.commit().await?;
        Ok(after)
    }

    /// 为载具添加效果（如持久损伤）
    pub async fn add_effect(
        db: &DatabaseConnection,
        id: i32,
        data: AddEffectData,
    ) -> AppResult<EffectWithModifiers> {
        let txn = db.begin().await?;
        let vehicle = Self::get(&txn, id).await?;
        let effect = EffectsRepository::create(&txn, EffectTarget::vehicle(vehicle.id), data).await?;

        if RatingRepository::vehicle_counts(&txn, &vehicle).await? {
            GangsRepository::adjust_rating(&txn, vehicle.gang_id, effect.effect.credits_increase)
                .await?;
        }
        txn.commit().await?;
        Ok(effect)
    }

    /// 删除载具
    ///
    /// 不退还金币；载具上的装备和效果一并删除。
    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<i32> {
        let txn = db.begin().await?;
        let vehicle = Self::get(&txn, id).await?;
        let removed = Self::contribution(&txn, &vehicle).await?;

        FighterEffects::delete_many()
            .filter(fighter_effects::Column::VehicleId.eq(vehicle.id))
            .exec(&txn)
            .await?;
        FighterEquipment::delete_many()
            .filter(fighter_equipment::Column::VehicleId.eq(vehicle.id))
            .exec(&txn)
            .await?;
        Vehicles::delete_by_id(vehicle.id).exec(&txn).await?;

        GangsRepository::adjust_rating(&txn, vehicle.gang_id, -removed).await?;
        txn.commit().await?;

        log::info!("删除载具 {}，评分 {:+}", id, -removed);
        Ok(vehicle.gang_id)
    }
}
