//! Shipping Zone Rule Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rule type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    SeasonalBlock,
    ServiceRequirement,
    TransitLimit,
    Surcharge,
}

/// Rule conditions. A `None` field matches any order (wildcard).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuleConditions {
    /// State codes the rule applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,
    /// Order months (1-12) the rule applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months: Option<Vec<u32>>,
    /// Rule applies to shipments slower than this many days
    #[serde(
        default,
        deserialize_with = "serde_helpers::option_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_transit_days: Option<i32>,
    /// Product categories the rule applies to (any overlap matches)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    /// Rule applies to orders worth at least this much
    #[serde(
        default,
        deserialize_with = "serde_helpers::option_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_order_value: Option<f64>,
}

/// Rule actions. Fields are independent; nothing stops a rule from both
/// blocking and carrying a surcharge.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuleActions {
    #[serde(default)]
    pub block: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_message: Option<String>,
    /// Services the customer is restricted to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_services: Option<Vec<String>>,
    /// Flat surcharge (currency units)
    #[serde(
        default,
        deserialize_with = "serde_helpers::option_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub surcharge_amount: Option<f64>,
    /// Percentage surcharge (10 = 10%)
    #[serde(
        default,
        deserialize_with = "serde_helpers::option_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub surcharge_percent: Option<f64>,
}

/// Shipping zone rule entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingZoneRule {
    pub id: i64,
    pub name: String,
    pub rule_type: RuleType,
    /// Lower value = higher precedence
    pub priority: i32,
    #[serde(default)]
    pub conditions: RuleConditions,
    #[serde(default)]
    pub actions: RuleActions,
    /// Window start (inclusive); `None` = unbounded
    #[serde(default)]
    pub effective_start: Option<DateTime<Utc>>,
    /// Window end (inclusive); `None` = unbounded
    #[serde(default)]
    pub effective_end: Option<DateTime<Utc>>,
    #[serde(
        default = "serde_helpers::default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create shipping rule payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingRuleCreate {
    pub name: String,
    pub rule_type: RuleType,
    #[serde(default, deserialize_with = "serde_helpers::option_number")]
    pub priority: Option<i32>,
    pub conditions: Option<RuleConditions>,
    pub actions: Option<RuleActions>,
    pub effective_start: Option<DateTime<Utc>>,
    pub effective_end: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

/// Update shipping rule payload
///
/// Missing fields keep their stored value. The window bounds also accept an
/// explicit `null`, which clears the bound (`Some(None)`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippingRuleUpdate {
    pub name: Option<String>,
    pub rule_type: Option<RuleType>,
    #[serde(default, deserialize_with = "serde_helpers::option_number")]
    pub priority: Option<i32>,
    pub conditions: Option<RuleConditions>,
    pub actions: Option<RuleActions>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_start: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_end: Option<Option<DateTime<Utc>>>,
    pub is_active: Option<bool>,
}
