//! 帮派评分计算
//!
//! 评分 = 所有在役战士总花费之和。增量更新和重新计算都基于这里的函数，
//! 两者必须得到相同的结果。

use crate::database::pricing::{CostBreakdown, reported_credits};
use crate::entity::prelude::*;
use crate::entity::{
    fighter_effects, fighter_equipment, fighter_exotic_beasts, fighter_skills, fighters, vehicles,
};
use sea_orm::*;

pub struct RatingRepository;

impl RatingRepository {
    /// 战士是否作为异兽被其他战士拥有
    pub async fn is_owned_beast<C>(conn: &C, fighter_id: i32) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        let count = FighterExoticBeasts::find()
            .filter(fighter_exotic_beasts::Column::FighterPetId.eq(fighter_id))
            .count(conn)
            .await?;
        Ok(count > 0)
    }

    /// 载具总花费 = 载具花费 + 载具装备 + 载具效果
    pub async fn vehicle_total<C>(conn: &C, vehicle: &vehicles::Model) -> Result<i32, DbErr>
    where
        C: ConnectionTrait,
    {
        let equipment: i32 = FighterEquipment::find()
            .filter(fighter_equipment::Column::VehicleId.eq(vehicle.id))
            .all(conn)
            .await?
            .iter()
            .map(|e| e.purchase_cost)
            .sum();
        let effects: i32 = FighterEffects::find()
            .filter(fighter_effects::Column::VehicleId.eq(vehicle.id))
            .all(conn)
            .await?
            .iter()
            .map(|e| e.credits_increase)
            .sum();
        Ok(vehicle.cost + equipment + effects)
    }

    /// 计算战士总花费的各组成部分
    pub async fn fighter_breakdown<C>(
        conn: &C,
        fighter: &fighters::Model,
    ) -> Result<CostBreakdown, DbErr>
    where
        C: ConnectionTrait,
    {
        let owned = Self::is_owned_beast(conn, fighter.id).await?;

        let equipment = FighterEquipment::find()
            .filter(fighter_equipment::Column::FighterId.eq(fighter.id))
            .all(conn)
            .await?
            .iter()
            .map(|e| e.purchase_cost)
            .sum();
        let skills = FighterSkills::find()
            .filter(fighter_skills::Column::FighterId.eq(fighter.id))
            .all(conn)
            .await?
            .iter()
            .map(|s| s.credits_increase)
            .sum();
        let effects = FighterEffects::find()
            .filter(fighter_effects::Column::FighterId.eq(fighter.id))
            .all(conn)
            .await?
            .iter()
            .map(|e| e.credits_increase)
            .sum();

        let mut crewed = 0;
        let vehicles = Vehicles::find()
            .filter(vehicles::Column::FighterId.eq(fighter.id))
            .all(conn)
            .await?;
        for vehicle in &vehicles {
            crewed += Self::vehicle_total(conn, vehicle).await?;
        }

        Ok(CostBreakdown {
            credits: reported_credits(fighter.credits, owned),
            cost_adjustment: fighter.cost_adjustment,
            equipment,
            skills,
            effects,
            vehicles: crewed,
        })
    }

    pub async fn fighter_total<C>(conn: &C, fighter: &fighters::Model) -> Result<i32, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(Self::fighter_breakdown(conn, fighter).await?.total())
    }

    /// 战士对帮派评分的贡献：不在役时为 0
    pub async fn fighter_contribution<C>(conn: &C, fighter: &fighters::Model) -> Result<i32, DbErr>
    where
        C: ConnectionTrait,
    {
        if fighter.is_active() {
            Self::fighter_total(conn, fighter).await
        } else {
            Ok(0)
        }
    }

    /// 载具是否计入评分：有乘员且乘员在役
    pub async fn vehicle_counts<C>(conn: &C, vehicle: &vehicles::Model) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        match vehicle.fighter_id {
            Some(fighter_id) => Ok(Fighters::find_by_id(fighter_id)
                .one(conn)
                .await?
                .is_some_and(|f| f.is_active())),
            None => Ok(false),
        }
    }

    /// 挂在某个位置上的花费是否计入评分
    ///
    /// 战士 → 战士在役；载具 → 载具计入评分；两者都为空（仓库）→ 不计入。
    pub async fn location_counts<C>(
        conn: &C,
        fighter_id: Option<i32>,
        vehicle_id: Option<i32>,
    ) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        if let Some(fighter_id) = fighter_id {
            return Ok(Fighters::find_by_id(fighter_id)
                .one(conn)
                .await?
                .is_some_and(|f| f.is_active()));
        }
        if let Some(vehicle_id) = vehicle_id {
            return match Vehicles::find_by_id(vehicle_id).one(conn).await? {
                Some(vehicle) => Self::vehicle_counts(conn, &vehicle).await,
                None => Ok(false),
            };
        }
        Ok(false)
    }

    /// 从头计算帮派评分
    pub async fn compute_gang_rating<C>(conn: &C, gang_id: i32) -> Result<i32, DbErr>
    where
        C: ConnectionTrait,
    {
        let fighters = Fighters::find()
            .filter(fighters::Column::GangId.eq(gang_id))
            .all(conn)
            .await?;

        let mut rating = 0;
        for fighter in fighters.iter().filter(|f| f.is_active()) {
            rating += Self::fighter_total(conn, fighter).await?;
        }
        Ok(rating)
    }
}
