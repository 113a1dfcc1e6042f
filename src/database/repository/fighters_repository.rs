//! 战士数据仓库
//!
//! 雇佣、状态变化、技能和效果都会影响帮派评分；
//! 每个写操作在同一事务内计算评分变化并更新帮派。

use std::collections::HashSet;

use crate::database::dto::{AddEffectData, AddSkillData, HireFighterData, UpdateFighterData};
use crate::database::repository::effects_repository::{
    EffectTarget, EffectWithModifiers, EffectsRepository,
};
use crate::database::repository::fighter_equipment_repository::FighterEquipmentRepository;
use crate::database::repository::gangs_repository::{GangBalance, GangsRepository};
use crate::database::repository::rating_repository::RatingRepository;
use crate::database::stats::StatBlock;
use crate::entity::prelude::*;
use crate::entity::{
    fighter_equipment, fighter_exotic_beasts, fighter_skills, fighter_types, fighters, gangs,
};
use crate::error::{AppError, AppResult};
use sea_orm::*;
use serde::{Deserialize, Serialize};

/// 雇佣结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HireResult {
    pub fighter: fighters::Model,
    /// 免费获得的默认装备
    pub equipment: Vec<fighter_equipment::Model>,
    pub gang: GangBalance,
}

/// 删除战士的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovedFighters {
    pub gang_id: i32,
    /// 被删除的战士（含其拥有的异兽）
    pub fighter_ids: Vec<i32>,
    pub rating_delta: i32,
}

pub struct FightersRepository;

impl FightersRepository {
    // ==================== 查询操作 ====================

    pub async fn get<C>(conn: &C, id: i32) -> AppResult<fighters::Model>
    where
        C: ConnectionTrait,
    {
        Fighters::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("战士 {}", id)))
    }

    pub async fn list_by_gang<C>(conn: &C, gang_id: i32) -> Result<Vec<fighters::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Fighters::find()
            .filter(fighters::Column::GangId.eq(gang_id))
            .order_by_asc(fighters::Column::Id)
            .all(conn)
            .await
    }

    // ==================== 创建 ====================

    /// 按战士类型插入战士，属性从类型复制
    pub async fn insert_from_type<C>(
        conn: &C,
        gang: &gangs::Model,
        fighter_type: &fighter_types::Model,
        fighter_name: String,
        credits: i32,
    ) -> Result<fighters::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now().timestamp() as i32;
        let stats = StatBlock::from(fighter_type);

        fighters::ActiveModel {
            id: NotSet,
            gang_id: Set(gang.id),
            user_id: Set(gang.user_id),
            fighter_name: Set(fighter_name),
            fighter_type_id: Set(fighter_type.id),
            fighter_class: Set(fighter_type.fighter_class.clone()),
            credits: Set(credits),
            cost_adjustment: Set(0),
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
            xp: Set(0),
            kills: Set(0),
            killed: Set(false),
            retired: Set(false),
            enslaved: Set(false),
            starved: Set(false),
            recovery: Set(false),
            note: Set(None),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        }
        .insert(conn)
        .await
    }

    /// 雇佣战士
    ///
    /// 扣除雇佣花费，默认装备免费发放，评分增加新战士的总花费。
    pub async fn hire(
        db: &DatabaseConnection,
        gang_id: i32,
        data: HireFighterData,
    ) -> AppResult<HireResult> {
        let name = data.fighter_name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request("战士名称不能为空"));
        }

        let txn = db.begin().await?;
        let gang = GangsRepository::get(&txn, gang_id).await?;
        let fighter_type = FighterTypes::find_by_id(data.fighter_type_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("战士类型 {}", data.fighter_type_id)))?;

        let cost = data.cost.unwrap_or(fighter_type.cost);
        GangsRepository::ensure_amount(cost, "雇佣花费")?;
        GangsRepository::debit_credits(&txn, gang.id, cost).await?;

        let fighter = Self::insert_from_type(&txn, &gang, &fighter_type, name, cost).await?;
        let equipment =
            FighterEquipmentRepository::grant_defaults(&txn, gang.id, fighter.id, fighter_type.id)
                .await?;

        let total = RatingRepository::fighter_total(&txn, &fighter).await?;
        GangsRepository::adjust_rating(&txn, gang.id, total).await?;

        let balance = GangsRepository::balance(&txn, gang.id).await?;
        txn.commit().await?;

        log::info!(
            "帮派 {} 雇佣战士 {} ({})，花费 {}",
            gang.id,
            fighter.fighter_name,
            fighter.id,
            cost
        );
        Ok(HireResult {
            fighter,
            equipment,
            gang: balance,
        })
    }

    // ==================== 更新 ====================

    /// 更新战士
    ///
    /// 状态或花费修正变化时，评分变化 = 更新后贡献 - 更新前贡献。
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        updates: UpdateFighterData,
    ) -> AppResult<fighters::Model> {
        if updates
            .fighter_name
            .as_ref()
            .is_some_and(|n| n.trim().is_empty())
        {
            return Err(AppError::bad_request("战士名称不能为空"));
        }
        if updates.xp.is_some_and(|xp| xp < 0) || updates.kills.is_some_and(|k| k < 0) {
            return Err(AppError::bad_request("经验和击杀数不能为负数"));
        }
        if let Some(adjustment) = updates.cost_adjustment {
            GangsRepository::ensure_amount(adjustment, "花费修正")?;
        }

        let txn = db.begin().await?;
        let before = Self::get(&txn, id).await?;
        let before_contribution = RatingRepository::fighter_contribution(&txn, &before).await?;

        let now = chrono::Utc::now().timestamp() as i32;
        let after = fighters::ActiveModel {
            id: Set(id),
            fighter_name: updates
                .fighter_name
                .map(|n| n.trim().to_string())
                .map_or(NotSet, Set),
            xp: updates.xp.map_or(NotSet, Set),
            kills: updates.kills.map_or(NotSet, Set),
            cost_adjustment: updates.cost_adjustment.map_or(NotSet, Set),
            note: updates.note.map_or(NotSet, Set),
            killed: updates.killed.map_or(NotSet, Set),
            retired: updates.retired.map_or(NotSet, Set),
            enslaved: updates.enslaved.map_or(NotSet, Set),
            starved: updates.starved.map_or(NotSet, Set),
            recovery: updates.recovery.map_or(NotSet, Set),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        let after_contribution = RatingRepository::fighter_contribution(&txn, &after).await?;
        GangsRepository::adjust_rating(
            &txn,
            after.gang_id,
            after_contribution - before_contribution,
        )
        .await?;
        txn.commit().await?;

        if before.is_active() != after.is_active() {
            log::info!(
                "战士 {} 状态变化: {} -> {}",
                id,
                if before.is_active() { "在役" } else { "离队" },
                if after.is_active() { "在役" } else { "离队" }
            );
        }
        Ok(after)
    }

    // ==================== 删除 ====================

    /// 删除战士及其拥有的异兽（递归），返回扣减的评分
    ///
    /// 总花费在删除前计算；只有在役战士的贡献会被扣减。
    pub async fn remove_with_companions<C>(
        conn: &C,
        fighter: &fighters::Model,
    ) -> Result<(Vec<i32>, i32), DbErr>
    where
        C: ConnectionTrait,
    {
        let mut pending = vec![fighter.clone()];
        let mut seen = HashSet::new();
        let mut removed = Vec::new();
        let mut rating_removed = 0;

        while let Some(current) = pending.pop() {
            if !seen.insert(current.id) {
                continue;
            }
            rating_removed += RatingRepository::fighter_contribution(conn, &current).await?;

            let pet_ids: Vec<i32> = FighterExoticBeasts::find()
                .filter(fighter_exotic_beasts::Column::FighterOwnerId.eq(current.id))
                .all(conn)
                .await?
                .into_iter()
                .map(|link| link.fighter_pet_id)
                .collect();
            if !pet_ids.is_empty() {
                pending.extend(
                    Fighters::find()
                        .filter(fighters::Column::Id.is_in(pet_ids))
                        .all(conn)
                        .await?,
                );
            }
            removed.push(current.id);
        }

        Fighters::delete_many()
            .filter(fighters::Column::Id.is_in(removed.clone()))
            .exec(conn)
            .await?;

        Ok((removed, rating_removed))
    }

    /// 删除战士
    ///
    /// 不退还金币；在役时评分扣减其总花费，拥有的异兽一并删除。
    pub async fn delete(db: &DatabaseConnection, id: i32) -> AppResult<RemovedFighters> {
        let txn = db.begin().await?;
        let fighter = Self::get(&txn, id).await?;
        let (fighter_ids, rating_removed) = Self::remove_with_companions(&txn, &fighter).await?;
        GangsRepository::adjust_rating(&txn, fighter.gang_id, -rating_removed).await?;
        txn.commit().await?;

        log::info!("删除战士 {}，连带删除 {} 个战士", id, fighter_ids.len() - 1);
        Ok(RemovedFighters {
            gang_id: fighter.gang_id,
            fighter_ids,
            rating_delta: -rating_removed,
        })
    }

    // ==================== 技能 ====================

    pub async fn list_skills<C>(
        conn: &C,
        fighter_id: i32,
    ) -> Result<Vec<fighter_skills::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        FighterSkills::find()
            .filter(fighter_skills::Column::FighterId.eq(fighter_id))
            .order_by_asc(fighter_skills::Column::Id)
            .all(conn)
            .await
    }

    /// 添加技能
    ///
    /// 扣除 xp_cost 经验，经验不足时拒绝；在役时评分增加 credits_increase。
    pub async fn add_skill(
        db: &DatabaseConnection,
        fighter_id: i32,
        data: AddSkillData,
    ) -> AppResult<fighter_skills::Model> {
        let skill_name = data.skill_name.trim().to_string();
        if skill_name.is_empty() {
            return Err(AppError::bad_request("技能名称不能为空"));
        }
        if data.xp_cost < 0 {
            return Err(AppError::bad_request("经验花费不能为负数"));
        }
        GangsRepository::ensure_amount(data.credits_increase, "技能花费")?;

        let txn = db.begin().await?;
        let fighter = Self::get(&txn, fighter_id).await?;
        if fighter.xp < data.xp_cost {
            return Err(AppError::bad_request(format!(
                "经验不足: 需要 {}，当前 {}",
                data.xp_cost, fighter.xp
            )));
        }

        let now = chrono::Utc::now().timestamp() as i32;
        let skill = fighter_skills::ActiveModel {
            id: NotSet,
            fighter_id: Set(fighter.id),
            skill_name: Set(skill_name),
            credits_increase: Set(data.credits_increase),
            xp_cost: Set(data.xp_cost),
            is_advance: Set(data.is_advance),
            created_at: Set(Some(now)),
        }
        .insert(&txn)
        .await?;

        if data.xp_cost != 0 {
            fighters::ActiveModel {
                id: Set(fighter.id),
                xp: Set(fighter.xp - data.xp_cost),
                updated_at: Set(Some(now)),
                ..Default::default()
            }
            .update(&txn)
            .await?;
        }

        if fighter.is_active() {
            GangsRepository::adjust_rating(&txn, fighter.gang_id, skill.credits_increase).await?;
        }
        txn.commit().await?;
        Ok(skill)
    }

    /// 删除技能（不退还经验）
    pub async fn remove_skill(db: &DatabaseConnection, skill_id: i32) -> AppResult<i32> {
        let txn = db.begin().await?;
        let skill = FighterSkills::find_by_id(skill_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("技能 {}", skill_id)))?;
        let fighter = Self::get(&txn, skill.fighter_id).await?;

        FighterSkills::delete_by_id(skill_id).exec(&txn).await?;
        if fighter.is_active() {
            GangsRepository::adjust_rating(&txn, fighter.gang_id, -skill.credits_increase).await?;
        }
        txn.commit().await?;
        Ok(fighter.gang_id)
    }

    /// 技能所属的战士
    pub async fn skill_owner(db: &DatabaseConnection, skill_id: i32) -> AppResult<fighters::Model> {
        let skill = FighterSkills::find_by_id(skill_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::not_found(format!("技能 {}", skill_id)))?;
        Self::get(db, skill.fighter_id).await
    }

    // ==================== 效果 ====================

    /// 为战士添加效果
    pub async fn add_effect(
        db: &DatabaseConnection,
        fighter_id: i32,
        data: AddEffectData,
    ) -> AppResult<EffectWithModifiers> {
        let txn = db.begin().await?;
        let fighter = Self::get(&txn, fighter_id).await?;
        let effect = EffectsRepository::create(&txn, EffectTarget::fighter(fighter.id), data).await?;

        if fighter.is_active() {
            GangsRepository::adjust_rating(&txn, fighter.gang_id, effect.effect.credits_increase)
                .await?;
        }
        txn.commit().await?;
        Ok(effect)
    }
}
