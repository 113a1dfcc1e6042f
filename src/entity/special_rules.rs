//! 特殊规则 JSON 结构体
//!
//! 存储在 fighter_types.special_rules / vehicle_types.special_rules 列中。

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// 特殊规则列表（存储为 JSON 数组）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, FromJsonQueryResult)]
#[serde(transparent)]
pub struct SpecialRules(pub Vec<String>);

impl SpecialRules {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for SpecialRules {
    fn from(rules: Vec<String>) -> Self {
        Self(rules)
    }
}
