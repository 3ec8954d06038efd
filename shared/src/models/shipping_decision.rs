//! Order context and shipping decision
//!
//! Input and output of the eligibility evaluator. Both cross the HTTP
//! boundary (checkout flow, admin preview) as JSON.

use super::serde_helpers;
use super::shipping_rule::{RuleType, ShippingZoneRule};
use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Rounding for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Candidate shipment description.
///
/// Everything but the state code is optional; an absent field is "unknown".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderContext {
    pub state_code: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub order_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "serde_helpers::option_number")]
    pub transit_days: Option<i32>,
    #[serde(default, deserialize_with = "serde_helpers::option_number")]
    pub order_value: Option<f64>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl OrderContext {
    pub fn new(state_code: impl Into<String>) -> Self {
        Self {
            state_code: state_code.into(),
            ..Default::default()
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn with_order_date(mut self, date: NaiveDate) -> Self {
        self.order_date = Some(date);
        self
    }

    pub fn with_transit_days(mut self, days: i32) -> Self {
        self.transit_days = Some(days);
        self
    }

    pub fn with_order_value(mut self, value: f64) -> Self {
        self.order_value = Some(value);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Month (1-12) of the order date, if known
    pub fn order_month(&self) -> Option<u32> {
        self.order_date.map(|d| d.month())
    }
}

/// Accumulated surcharge (amount and percent stack additively)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Surcharge {
    /// Flat amount (currency units)
    pub amount: f64,
    /// Percentage of the shipping cost (10 = 10%)
    pub percent: f64,
}

impl Surcharge {
    pub fn is_zero(&self) -> bool {
        self.amount == 0.0 && self.percent == 0.0
    }

    /// Shipping cost after surcharge: cost + amount + cost * percent / 100
    ///
    /// Uses Decimal internally, rounded to 2 decimal places.
    pub fn apply_to(&self, shipping_cost: f64) -> f64 {
        let cost = Decimal::from_f64(shipping_cost).unwrap_or_default();
        let amount = Decimal::from_f64(self.amount).unwrap_or_default();
        let percent = Decimal::from_f64(self.percent).unwrap_or_default();

        let total = cost + amount + cost * percent / Decimal::ONE_HUNDRED;

        total
            .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or_default()
    }
}

/// Why an order was refused
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockReason {
    /// Zone status is blocked
    ZoneBlocked,
    /// Conditional zone requires a different service
    ServiceMismatch,
    /// Conditional zone refuses the order month
    Seasonal,
    /// Order value is below the conditional zone floor
    BelowMinimumOrderValue,
    /// Transit estimate is above the conditional zone limit
    TransitExceeded,
    /// A blocking rule matched
    Rule { rule_id: i64 },
}

/// Rule that contributed to a decision
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedShippingRule {
    pub rule_id: i64,
    pub name: String,
    pub rule_type: RuleType,
    pub priority: i32,
    /// This rule stopped evaluation by blocking
    #[serde(default)]
    pub blocked: bool,
}

impl AppliedShippingRule {
    pub fn from_rule(rule: &ShippingZoneRule, blocked: bool) -> Self {
        Self {
            rule_id: rule.id,
            name: rule.name.clone(),
            rule_type: rule.rule_type,
            priority: rule.priority,
            blocked,
        }
    }
}

/// Shipping decision for one order context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingDecision {
    pub allowed: bool,
    /// Services the customer must choose from (empty = no restriction)
    pub required_services: Vec<String>,
    /// Services the customer can actually select
    pub available_services: Vec<String>,
    pub surcharge: Surcharge,
    pub messages: Vec<String>,
    #[serde(default)]
    pub applied_rules: Vec<AppliedShippingRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<BlockReason>,
}

impl ShippingDecision {
    /// Unrestricted, surcharge-free decision
    pub fn allow() -> Self {
        Self {
            allowed: true,
            required_services: vec![],
            available_services: vec![],
            surcharge: Surcharge::default(),
            messages: vec![],
            applied_rules: vec![],
            block_reason: None,
        }
    }

    /// Refused decision with a single reason
    pub fn blocked(reason: BlockReason, message: Option<String>) -> Self {
        let mut decision = Self::allow();
        decision.allowed = false;
        decision.block_reason = Some(reason);
        decision.messages.extend(message);
        decision
    }

    /// Whether the customer may pick `service` under this decision
    pub fn is_service_selectable(&self, service: &str) -> bool {
        self.allowed
            && (self.required_services.is_empty()
                || self.required_services.iter().any(|s| s == service))
    }
}
