//! Shipping Rule Matcher
//!
//! Logic for matching rules to an order context and checking time validity.
//!
//! A condition that is `None` (or an empty list) matches everything. A present
//! condition whose order-context input is unknown does not match, so the rule
//! is skipped rather than applied.

use chrono::{DateTime, Utc};
use storefront_shared::models::{OrderContext, RuleConditions, ShippingZoneRule};

/// Check if a rule is in effect at `now` (active flag + effective window)
///
/// Both window bounds are inclusive; a missing bound is open-ended.
pub fn is_time_valid(rule: &ShippingZoneRule, now: DateTime<Utc>) -> bool {
    if !rule.is_active {
        return false;
    }
    if let Some(start) = rule.effective_start
        && now < start
    {
        return false;
    }
    if let Some(end) = rule.effective_end
        && now > end
    {
        return false;
    }
    true
}

/// Describe why a stored rule cannot be evaluated, if it is malformed
pub fn malformed_reason(rule: &ShippingZoneRule) -> Option<&'static str> {
    let conditions = &rule.conditions;
    let actions = &rule.actions;

    if let Some(percent) = actions.surcharge_percent
        && !(0.0..=100.0).contains(&percent)
    {
        return Some("surcharge_percent outside [0, 100]");
    }
    if let Some(amount) = actions.surcharge_amount
        && !(amount >= 0.0)
    {
        return Some("negative surcharge_amount");
    }
    if let Some(days) = conditions.max_transit_days
        && days <= 0
    {
        return Some("max_transit_days must be positive");
    }
    if let Some(months) = &conditions.months
        && months.iter().any(|m| !(1..=12).contains(m))
    {
        return Some("month outside 1-12");
    }
    if let Some(min) = conditions.min_order_value
        && !(min >= 0.0)
    {
        return Some("negative min_order_value");
    }
    if let (Some(start), Some(end)) = (rule.effective_start, rule.effective_end)
        && start > end
    {
        return Some("effective_start after effective_end");
    }
    None
}

/// Check that every present condition matches the order context
///
/// `state_code` is the normalized destination code of the resolved zone.
pub fn matches_conditions(
    conditions: &RuleConditions,
    ctx: &OrderContext,
    state_code: &str,
) -> bool {
    matches_states(conditions.states.as_deref(), state_code)
        && matches_months(conditions.months.as_deref(), ctx.order_month())
        && matches_transit(conditions.max_transit_days, ctx.transit_days)
        && matches_categories(conditions.categories.as_deref(), &ctx.categories)
        && matches_order_value(conditions.min_order_value, ctx.order_value)
}

fn matches_states(states: Option<&[String]>, state_code: &str) -> bool {
    match states {
        None | Some([]) => true,
        Some(states) => states
            .iter()
            .any(|s| s.trim().eq_ignore_ascii_case(state_code)),
    }
}

fn matches_months(months: Option<&[u32]>, order_month: Option<u32>) -> bool {
    match months {
        None | Some([]) => true,
        Some(months) => order_month.is_some_and(|m| months.contains(&m)),
    }
}

/// Transit limit rules target shipments slower than the limit
fn matches_transit(limit: Option<i32>, transit_days: Option<i32>) -> bool {
    match limit {
        None => true,
        Some(limit) => transit_days.is_some_and(|days| days > limit),
    }
}

fn matches_categories(categories: Option<&[String]>, order_categories: &[String]) -> bool {
    match categories {
        None | Some([]) => true,
        Some(categories) => order_categories
            .iter()
            .any(|oc| categories.iter().any(|c| c.eq_ignore_ascii_case(oc))),
    }
}

fn matches_order_value(min: Option<f64>, order_value: Option<f64>) -> bool {
    match min {
        None => true,
        Some(min) => order_value.is_some_and(|value| value >= min),
    }
}
