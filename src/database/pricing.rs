//! 花费计算
//!
//! 与数据库无关的纯函数：装备购买价格、战士总花费。
//! 仓库层读取数据后调用这里的函数，保证增量评分与重新计算使用同一套规则。

use serde::{Deserialize, Serialize};

use crate::entity::equipment_discounts;

/// 大师级武器的价格倍率（按百分比）
const MASTER_CRAFTED_PERCENT: i32 = 125;

/// 大师级价格向上取整的步长
const MASTER_CRAFTED_ROUNDING: i32 = 5;

/// 用户输入的单次金币数额上限（绝对值）
pub const MAX_AMOUNT: i32 = 1_000_000;

pub fn within_amount_limit(value: i32) -> bool {
    value.checked_abs().is_some_and(|v| v <= MAX_AMOUNT)
}

/// 从折扣列表中选出适用的折扣价
///
/// 战士类型匹配优先于帮派类型匹配；都不匹配时返回 None。
pub fn pick_discount(
    discounts: &[equipment_discounts::Model],
    gang_type_id: i32,
    fighter_type_id: Option<i32>,
) -> Option<i32> {
    if let Some(ft) = fighter_type_id {
        if let Some(d) = discounts.iter().find(|d| d.fighter_type_id == Some(ft)) {
            return Some(d.adjusted_cost);
        }
    }
    discounts
        .iter()
        .find(|d| d.fighter_type_id.is_none() && d.gang_type_id == Some(gang_type_id))
        .map(|d| d.adjusted_cost)
}

/// 大师级加价：×1.25 后向上取整到 5 的倍数，溢出时返回 None
pub fn master_crafted_cost(cost: i32) -> Option<i32> {
    let raised = i64::from(cost) * i64::from(MASTER_CRAFTED_PERCENT);
    let step = 100 * i64::from(MASTER_CRAFTED_ROUNDING);
    // 整数向上取整，避免浮点误差
    let rounded = (raised + step - 1).div_euclid(step) * i64::from(MASTER_CRAFTED_ROUNDING);
    i32::try_from(rounded).ok()
}

/// 单次购买的价格明细
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchasePrice {
    /// 装备目录中的原价
    pub base_cost: i32,
    /// 折扣后的价格（无折扣时等于原价）
    pub discounted_cost: i32,
    /// 最终扣除的金币
    pub final_cost: i32,
    /// 大师级是否实际生效
    pub master_crafted: bool,
}

/// 计算购买价格
///
/// 顺序：原价 → 折扣 → 手动价格覆盖 → 大师级（仅武器）。
/// 大师级加价溢出 i32 时返回 None。
pub fn purchase_price(
    base_cost: i32,
    discount: Option<i32>,
    manual_cost: Option<i32>,
    is_weapon: bool,
    master_crafted: bool,
) -> Option<PurchasePrice> {
    let discounted_cost = discount.unwrap_or(base_cost);
    let chosen = manual_cost.unwrap_or(discounted_cost);
    let master_crafted = master_crafted && is_weapon;
    let final_cost = if master_crafted {
        master_crafted_cost(chosen)?
    } else {
        chosen
    };

    Some(PurchasePrice {
        base_cost,
        discounted_cost,
        final_cost,
        master_crafted,
    })
}

/// 战士总花费的组成部分
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub credits: i32,
    pub cost_adjustment: i32,
    pub equipment: i32,
    pub skills: i32,
    pub effects: i32,
    pub vehicles: i32,
}

impl CostBreakdown {
    /// 各部分之和，超出 i32 范围时饱和
    pub fn total(&self) -> i32 {
        [
            self.cost_adjustment,
            self.equipment,
            self.skills,
            self.effects,
            self.vehicles,
        ]
        .into_iter()
        .fold(self.credits, i32::saturating_add)
    }
}

/// 对外显示的战士基础花费：作为异兽被其他战士拥有时恒为 0
pub fn reported_credits(credits: i32, owned_by_fighter: bool) -> i32 {
    if owned_by_fighter { 0 } else { credits }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discount(
        gang_type_id: Option<i32>,
        fighter_type_id: Option<i32>,
        cost: i32,
    ) -> equipment_discounts::Model {
        equipment_discounts::Model {
            id: 0,
            equipment_id: 1,
            gang_type_id,
            fighter_type_id,
            adjusted_cost: cost,
        }
    }

    #[test]
    fn master_crafted_rounds_up_to_five() {
        assert_eq!(master_crafted_cost(20), Some(25));
        assert_eq!(master_crafted_cost(30), Some(40)); // 37.5 -> 40
        assert_eq!(master_crafted_cost(35), Some(45)); // 43.75 -> 45
        assert_eq!(master_crafted_cost(40), Some(50));
        assert_eq!(master_crafted_cost(0), Some(0));
        assert_eq!(master_crafted_cost(5), Some(10)); // 6.25 -> 10
    }

    #[test]
    fn master_crafted_large_costs_do_not_overflow() {
        assert_eq!(master_crafted_cost(20_000_000), Some(25_000_000));
        assert_eq!(master_crafted_cost(i32::MAX), None);
        assert!(purchase_price(10, None, Some(i32::MAX), true, true).is_none());
        // 非武器不加价，不会溢出
        let wargear = purchase_price(10, None, Some(i32::MAX), false, true).unwrap();
        assert_eq!(wargear.final_cost, i32::MAX);
    }

    #[test]
    fn amount_limit_rejects_huge_values() {
        assert!(within_amount_limit(MAX_AMOUNT));
        assert!(within_amount_limit(-MAX_AMOUNT));
        assert!(!within_amount_limit(MAX_AMOUNT + 1));
        assert!(!within_amount_limit(i32::MIN));
    }

    #[test]
    fn fighter_type_discount_beats_gang_type_discount() {
        let discounts = vec![discount(Some(3), None, 15), discount(None, Some(7), 10)];
        assert_eq!(pick_discount(&discounts, 3, Some(7)), Some(10));
        assert_eq!(pick_discount(&discounts, 3, Some(8)), Some(15));
        assert_eq!(pick_discount(&discounts, 3, None), Some(15));
        assert_eq!(pick_discount(&discounts, 4, Some(8)), None);
    }

    #[test]
    fn manual_cost_overrides_discount_then_master_crafted_applies() {
        let price = purchase_price(30, Some(20), Some(40), true, true).unwrap();
        assert_eq!(price.discounted_cost, 20);
        assert_eq!(price.final_cost, 50);
        assert!(price.master_crafted);
    }

    #[test]
    fn master_crafted_is_ignored_for_wargear() {
        let price = purchase_price(30, None, None, false, true).unwrap();
        assert_eq!(price.final_cost, 30);
        assert!(!price.master_crafted);
    }

    #[test]
    fn owned_beasts_report_zero_credits() {
        assert_eq!(reported_credits(80, true), 0);
        assert_eq!(reported_credits(80, false), 80);
    }

    #[test]
    fn breakdown_total_sums_every_part() {
        let b = CostBreakdown {
            credits: 100,
            cost_adjustment: -10,
            equipment: 45,
            skills: 20,
            effects: 5,
            vehicles: 120,
        };
        assert_eq!(b.total(), 280);
    }

    #[test]
    fn breakdown_total_saturates() {
        let b = CostBreakdown {
            credits: i32::MAX,
            cost_adjustment: 10,
            ..Default::default()
        };
        assert_eq!(b.total(), i32::MAX);
    }
}
