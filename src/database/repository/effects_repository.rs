//! 效果数据仓库
//!
//! 效果挂在战士或载具上，可能由装备授予（fighter_equipment_id 不为空）。
//! 修正值在创建时从效果类型复制，之后与模板无关。

use std::collections::HashMap;

use crate::database::dto::{AddEffectData, ModifierInput};
use crate::database::repository::gangs_repository::GangsRepository;
use crate::database::repository::rating_repository::RatingRepository;
use crate::database::stats::{is_fighter_stat, is_vehicle_stat};
use crate::entity::prelude::*;
use crate::entity::{
    fighter_effect_modifiers, fighter_effect_type_modifiers, fighter_effect_types,
    fighter_effects,
};
use crate::error::{AppError, AppResult};
use sea_orm::*;
use serde::{Deserialize, Serialize};

/// 效果及其修正值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectWithModifiers {
    #[serde(flatten)]
    pub effect: fighter_effects::Model,
    pub modifiers: Vec<fighter_effect_modifiers::Model>,
}

impl EffectWithModifiers {
    /// (属性名, 数值) 形式的修正值，用于叠加属性
    pub fn stat_modifiers(&self) -> impl Iterator<Item = (&str, i32)> {
        self.modifiers
            .iter()
            .map(|m| (m.stat_name.as_str(), m.numeric_value))
    }
}

/// 效果挂载的位置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectTarget {
    pub fighter_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub fighter_equipment_id: Option<i32>,
}

impl EffectTarget {
    pub fn fighter(fighter_id: i32) -> Self {
        Self {
            fighter_id: Some(fighter_id),
            ..Default::default()
        }
    }

    pub fn vehicle(vehicle_id: i32) -> Self {
        Self {
            vehicle_id: Some(vehicle_id),
            ..Default::default()
        }
    }

    fn is_vehicle(&self) -> bool {
        self.fighter_id.is_none() && self.vehicle_id.is_some()
    }
}

/// 删除效果后的评分变化
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RemovedEffect {
    pub gang_id: i32,
    pub rating_delta: i32,
}

pub struct EffectsRepository;

impl EffectsRepository {
    async fn insert<C>(
        conn: &C,
        target: EffectTarget,
        effect_type_id: Option<i32>,
        effect_name: String,
        effect_category: String,
        credits_increase: i32,
        modifiers: Vec<(String, i32)>,
    ) -> Result<EffectWithModifiers, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now().timestamp() as i32;
        let effect = fighter_effects::ActiveModel {
            id: NotSet,
            fighter_id: Set(target.fighter_id),
            vehicle_id: Set(target.vehicle_id),
            fighter_effect_type_id: Set(effect_type_id),
            fighter_equipment_id: Set(target.fighter_equipment_id),
            effect_name: Set(effect_name),
            effect_category: Set(effect_category),
            credits_increase: Set(credits_increase),
            created_at: Set(Some(now)),
        }
        .insert(conn)
        .await?;

        let mut inserted = Vec::with_capacity(modifiers.len());
        for (stat_name, numeric_value) in modifiers {
            let modifier = fighter_effect_modifiers::ActiveModel {
                id: NotSet,
                fighter_effect_id: Set(effect.id),
                stat_name: Set(stat_name),
                numeric_value: Set(numeric_value),
            }
            .insert(conn)
            .await?;
            inserted.push(modifier);
        }

        Ok(EffectWithModifiers {
            effect,
            modifiers: inserted,
        })
    }

    /// 效果类型的默认修正值
    pub async fn type_modifiers<C>(
        conn: &C,
        effect_type_id: i32,
    ) -> Result<Vec<fighter_effect_type_modifiers::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        FighterEffectTypeModifiers::find()
            .filter(fighter_effect_type_modifiers::Column::FighterEffectTypeId.eq(effect_type_id))
            .order_by_asc(fighter_effect_type_modifiers::Column::Id)
            .all(conn)
            .await
    }

    /// 按效果类型创建效果，修正值取模板默认值
    pub async fn insert_from_type<C>(
        conn: &C,
        effect_type: &fighter_effect_types::Model,
        target: EffectTarget,
    ) -> Result<EffectWithModifiers, DbErr>
    where
        C: ConnectionTrait,
    {
        let modifiers = Self::type_modifiers(conn, effect_type.id)
            .await?
            .into_iter()
            .map(|m| (m.stat_name, m.default_numeric_value))
            .collect();

        Self::insert(
            conn,
            target,
            Some(effect_type.id),
            effect_type.effect_name.clone(),
            effect_type.effect_category.clone(),
            effect_type.credits_increase,
            modifiers,
        )
        .await
    }

    /// 为某件装备的所有授予效果创建实例
    pub async fn insert_for_equipment<C>(
        conn: &C,
        equipment_id: i32,
        target: EffectTarget,
    ) -> Result<Vec<EffectWithModifiers>, DbErr>
    where
        C: ConnectionTrait,
    {
        let effect_types = FighterEffectTypes::find()
            .filter(fighter_effect_types::Column::EquipmentId.eq(equipment_id))
            .order_by_asc(fighter_effect_types::Column::Id)
            .all(conn)
            .await?;

        let mut created = Vec::with_capacity(effect_types.len());
        for effect_type in &effect_types {
            created.push(Self::insert_from_type(conn, effect_type, target).await?);
        }
        Ok(created)
    }

    /// 按请求创建效果
    ///
    /// 提供效果类型时以模板为基础，请求中的字段覆盖模板；否则为自定义效果。
    /// 修正值的属性名必须属于目标（战士或载具）的属性表。
    pub async fn create<C>(
        conn: &C,
        target: EffectTarget,
        data: AddEffectData,
    ) -> AppResult<EffectWithModifiers>
    where
        C: ConnectionTrait,
    {
        let (type_id, name, category, credits, modifiers) = match data.fighter_effect_type_id {
            Some(type_id) => {
                let effect_type = FighterEffectTypes::find_by_id(type_id)
                    .one(conn)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("效果类型 {}", type_id)))?;
                let modifiers = match data.modifiers {
                    Some(overrides) => to_pairs(overrides),
                    None => Self::type_modifiers(conn, type_id)
                        .await?
                        .into_iter()
                        .map(|m| (m.stat_name, m.default_numeric_value))
                        .collect(),
                };
                (
                    Some(type_id),
                    data.effect_name.unwrap_or(effect_type.effect_name),
                    data.effect_category.unwrap_or(effect_type.effect_category),
                    data.credits_increase.unwrap_or(effect_type.credits_increase),
                    modifiers,
                )
            }
            None => {
                let name = data
                    .effect_name
                    .filter(|n| !n.trim().is_empty())
                    .ok_or_else(|| AppError::bad_request("自定义效果必须提供名称"))?;
                (
                    None,
                    name,
                    data.effect_category.unwrap_or_else(|| "user".to_string()),
                    data.credits_increase.unwrap_or(0),
                    to_pairs(data.modifiers.unwrap_or_default()),
                )
            }
        };

        let valid_stat: fn(&str) -> bool = if target.is_vehicle() {
            is_vehicle_stat
        } else {
            is_fighter_stat
        };
        if let Some((stat, _)) = modifiers.iter().find(|(stat, _)| !valid_stat(stat)) {
            return Err(AppError::bad_request(format!("未知的属性: {}", stat)));
        }
        GangsRepository::ensure_amount(credits, "效果花费")?;

        Ok(Self::insert(conn, target, type_id, name, category, credits, modifiers).await?)
    }

    // ==================== 查询操作 ====================

    pub async fn get<C>(conn: &C, id: i32) -> AppResult<fighter_effects::Model>
    where
        C: ConnectionTrait,
    {
        FighterEffects::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("效果 {}", id)))
    }

    /// 效果所属的帮派（通过战士、载具或装备）
    pub async fn gang_id_of<C>(conn: &C, effect: &fighter_effects::Model) -> AppResult<i32>
    where
        C: ConnectionTrait,
    {
        if let Some(fighter_id) = effect.fighter_id {
            if let Some(fighter) = Fighters::find_by_id(fighter_id).one(conn).await? {
                return Ok(fighter.gang_id);
            }
        }
        if let Some(vehicle_id) = effect.vehicle_id {
            if let Some(vehicle) = Vehicles::find_by_id(vehicle_id).one(conn).await? {
                return Ok(vehicle.gang_id);
            }
        }
        if let Some(item_id) = effect.fighter_equipment_id {
            if let Some(item) = FighterEquipment::find_by_id(item_id).one(conn).await? {
                return Ok(item.gang_id);
            }
        }
        Err(AppError::not_found(format!("效果 {} 的所属帮派", effect.id)))
    }

    /// 批量加载效果的修正值
    pub async fn with_modifiers<C>(
        conn: &C,
        effects: Vec<fighter_effects::Model>,
    ) -> Result<Vec<EffectWithModifiers>, DbErr>
    where
        C: ConnectionTrait,
    {
        if effects.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = effects.iter().map(|e| e.id).collect();
        let mut by_effect: HashMap<i32, Vec<fighter_effect_modifiers::Model>> = HashMap::new();
        for modifier in FighterEffectModifiers::find()
            .filter(fighter_effect_modifiers::Column::FighterEffectId.is_in(ids))
            .order_by_asc(fighter_effect_modifiers::Column::Id)
            .all(conn)
            .await?
        {
            by_effect
                .entry(modifier.fighter_effect_id)
                .or_default()
                .push(modifier);
        }

        Ok(effects
            .into_iter()
            .map(|effect| EffectWithModifiers {
                modifiers: by_effect.remove(&effect.id).unwrap_or_default(),
                effect,
            })
            .collect())
    }

    // ==================== 删除操作 ====================

    /// 删除效果，计入评分时同步扣减
    pub async fn remove(db: &DatabaseConnection, id: i32) -> AppResult<RemovedEffect> {
        let txn = db.begin().await?;
        let effect = Self::get(&txn, id).await?;
        let gang_id = Self::gang_id_of(&txn, &effect).await?;

        let counted =
            RatingRepository::location_counts(&txn, effect.fighter_id, effect.vehicle_id).await?;
        let rating_delta = if counted {
            -effect.credits_increase
        } else {
            0
        };

        FighterEffects::delete_by_id(id).exec(&txn).await?;
        GangsRepository::adjust_rating(&txn, gang_id, rating_delta).await?;
        txn.commit().await?;

        Ok(RemovedEffect {
            gang_id,
            rating_delta,
        })
    }
}

fn to_pairs(modifiers: Vec<ModifierInput>) -> Vec<(String, i32)> {
    modifiers
        .into_iter()
        .map(|m| (m.stat_name, m.numeric_value))
        .collect()
}
