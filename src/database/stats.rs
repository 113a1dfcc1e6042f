//! 属性计算
//!
//! 战士与载具的有效属性 = 基础属性 + 所有效果修正值之和。

use serde::{Deserialize, Serialize};

use crate::entity::{fighter_types, fighters, vehicle_types, vehicles};

/// 战士可被效果修改的属性名
pub const FIGHTER_STATS: [&str; 12] = [
    "movement",
    "weapon_skill",
    "ballistic_skill",
    "strength",
    "toughness",
    "wounds",
    "initiative",
    "attacks",
    "leadership",
    "cool",
    "willpower",
    "intelligence",
];

/// 载具可被效果修改的属性名
pub const VEHICLE_STATS: [&str; 7] = [
    "movement",
    "front",
    "side",
    "rear",
    "hull_points",
    "handling",
    "save",
];

pub fn is_fighter_stat(name: &str) -> bool {
    FIGHTER_STATS.contains(&name)
}

pub fn is_vehicle_stat(name: &str) -> bool {
    VEHICLE_STATS.contains(&name)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub movement: i32,
    pub weapon_skill: i32,
    pub ballistic_skill: i32,
    pub strength: i32,
    pub toughness: i32,
    pub wounds: i32,
    pub initiative: i32,
    pub attacks: i32,
    pub leadership: i32,
    pub cool: i32,
    pub willpower: i32,
    pub intelligence: i32,
}

impl StatBlock {
    fn slot(&mut self, stat: &str) -> Option<&mut i32> {
        Some(match stat {
            "movement" => &mut self.movement,
            "weapon_skill" => &mut self.weapon_skill,
            "ballistic_skill" => &mut self.ballistic_skill,
            "strength" => &mut self.strength,
            "toughness" => &mut self.toughness,
            "wounds" => &mut self.wounds,
            "initiative" => &mut self.initiative,
            "attacks" => &mut self.attacks,
            "leadership" => &mut self.leadership,
            "cool" => &mut self.cool,
            "willpower" => &mut self.willpower,
            "intelligence" => &mut self.intelligence,
            _ => return None,
        })
    }

    /// 叠加修正值，未知属性名被忽略
    pub fn apply<'a, I>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        for (stat, value) in modifiers {
            match self.slot(stat) {
                Some(slot) => *slot += value,
                None => log::warn!("忽略未知的战士属性修正: {}", stat),
            }
        }
        self
    }
}

impl From<&fighters::Model> for StatBlock {
    fn from(f: &fighters::Model) -> Self {
        Self {
            movement: f.movement,
            weapon_skill: f.weapon_skill,
            ballistic_skill: f.ballistic_skill,
            strength: f.strength,
            toughness: f.toughness,
            wounds: f.wounds,
            initiative: f.initiative,
            attacks: f.attacks,
            leadership: f.leadership,
            cool: f.cool,
            willpower: f.willpower,
            intelligence: f.intelligence,
        }
    }
}

impl From<&fighter_types::Model> for StatBlock {
    fn from(t: &fighter_types::Model) -> Self {
        Self {
            movement: t.movement,
            weapon_skill: t.weapon_skill,
            ballistic_skill: t.ballistic_skill,
            strength: t.strength,
            toughness: t.toughness,
            wounds: t.wounds,
            initiative: t.initiative,
            attacks: t.attacks,
            leadership: t.leadership,
            cool: t.cool,
            willpower: t.willpower,
            intelligence: t.intelligence,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleStats {
    pub movement: i32,
    pub front: i32,
    pub side: i32,
    pub rear: i32,
    pub hull_points: i32,
    pub handling: i32,
    pub save: i32,
}

impl VehicleStats {
    pub fn apply<'a, I>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        for (stat, value) in modifiers {
            let slot = match stat {
                "movement" => &mut self.movement,
                "front" => &mut self.front,
                "side" => &mut self.side,
                "rear" => &mut self.rear,
                "hull_points" => &mut self.hull_points,
                "handling" => &mut self.handling,
                "save" => &mut self.save,
                _ => {
                    log::warn!("忽略未知的载具属性修正: {}", stat);
                    continue;
                }
            };
            *slot += value;
        }
        self
    }
}

impl From<&vehicles::Model> for VehicleStats {
    fn from(v: &vehicles::Model) -> Self {
        Self {
            movement: v.movement,
            front: v.front,
            side: v.side,
            rear: v.rear,
            hull_points: v.hull_points,
            handling: v.handling,
            save: v.save,
        }
    }
}

impl From<&vehicle_types::Model> for VehicleStats {
    fn from(t: &vehicle_types::Model) -> Self {
        Self {
            movement: t.movement,
            front: t.front,
            side: t.side,
            rear: t.rear,
            hull_points: t.hull_points,
            handling: t.handling,
            save: t.save,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_stack_on_base_stats() {
        let base = StatBlock {
            movement: 5,
            toughness: 3,
            wounds: 2,
            ..Default::default()
        };
        let effective = base.apply([("toughness", -1), ("movement", 1), ("toughness", -1)]);
        assert_eq!(effective.toughness, 1);
        assert_eq!(effective.movement, 6);
        assert_eq!(effective.wounds, 2);
    }

    #[test]
    fn unknown_stats_are_ignored() {
        let base = StatBlock::default();
        assert_eq!(base.apply([("charisma", 3)]), base);
        let vehicle = VehicleStats::default();
        assert_eq!(vehicle.apply([("toughness", 1)]), vehicle);
    }

    #[test]
    fn vehicle_damage_reduces_hull() {
        let v = VehicleStats {
            hull_points: 4,
            handling: 6,
            ..Default::default()
        };
        let damaged = v.apply([("hull_points", -1), ("handling", 1)]);
        assert_eq!(damaged.hull_points, 3);
        assert_eq!(damaged.handling, 7);
    }

    #[test]
    fn stat_name_lists_are_consistent() {
        assert!(is_fighter_stat("cool"));
        assert!(!is_fighter_stat("hull_points"));
        assert!(is_vehicle_stat("hull_points"));
    }
}
