//! Eligibility Evaluator
//!
//! Turns (zone, rule set, order context, evaluation time) into a
//! [`ShippingDecision`]. Evaluation is pure: the same inputs always produce
//! the same decision, and nothing is mutated.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use storefront_shared::AppResult;
use storefront_shared::models::{
    AppliedShippingRule, BlockReason, OrderContext, ShippingDecision, ShippingSettings,
    ShippingZone, ShippingZoneRule, Surcharge,
};

use super::matcher::{is_time_valid, malformed_reason, matches_conditions};
use super::registry::ZoneRegistry;
use super::zone_check::{ZoneOutcome, check_zone};

/// Shipping eligibility evaluator
#[derive(Debug, Clone, Default)]
pub struct EligibilityEvaluator {
    settings: ShippingSettings,
}

impl EligibilityEvaluator {
    pub fn new(settings: ShippingSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ShippingSettings {
        &self.settings
    }

    /// Resolve the destination zone and evaluate the order against it
    ///
    /// # Errors
    /// `InvalidStateCode` when the context's state code is not one of the 50 states.
    pub fn evaluate(
        &self,
        registry: &ZoneRegistry,
        rules: &[ShippingZoneRule],
        ctx: &OrderContext,
        now: DateTime<Utc>,
    ) -> AppResult<ShippingDecision> {
        let zone = registry.lookup(&ctx.state_code)?;
        Ok(self.evaluate_zone(&zone, rules, ctx, now))
    }

    /// Evaluate an order against an already resolved zone
    pub fn evaluate_zone(
        &self,
        zone: &ShippingZone,
        rules: &[ShippingZoneRule],
        ctx: &OrderContext,
        now: DateTime<Utc>,
    ) -> ShippingDecision {
        let mut required_services = Vec::new();

        match check_zone(zone, ctx) {
            ZoneOutcome::Blocked { reason, message } => {
                tracing::debug!(
                    state_code = %zone.state_code,
                    ?reason,
                    "Order blocked by zone"
                );
                let message = message.unwrap_or_else(|| self.settings.default_block_message.clone());
                return ShippingDecision::blocked(reason, Some(message));
            }
            ZoneOutcome::Pass { required_service } => {
                required_services.extend(required_service);
            }
        }

        let mut decision = ShippingDecision::allow();
        let mut surcharge_amount = Decimal::ZERO;
        let mut surcharge_percent = Decimal::ZERO;

        for rule in self.matching_rules(rules, ctx, &zone.state_code, now) {
            if rule.actions.block {
                tracing::debug!(
                    rule_id = rule.id,
                    rule_name = %rule.name,
                    "Order blocked by rule"
                );
                decision.allowed = false;
                decision.block_reason = Some(BlockReason::Rule { rule_id: rule.id });
                decision.messages.push(self.block_message(rule));
                decision
                    .applied_rules
                    .push(AppliedShippingRule::from_rule(rule, true));
                break;
            }

            if let Some(services) = &rule.actions.required_services {
                for service in services {
                    if !required_services.contains(service) {
                        required_services.push(service.clone());
                    }
                }
            }
            surcharge_amount += to_decimal(rule.actions.surcharge_amount);
            surcharge_percent += to_decimal(rule.actions.surcharge_percent);
            decision
                .applied_rules
                .push(AppliedShippingRule::from_rule(rule, false));
        }

        decision.surcharge = Surcharge {
            amount: to_f64(surcharge_amount),
            percent: to_f64(surcharge_percent),
        };
        decision.available_services = if decision.allowed {
            self.settings.selectable_services(&required_services)
        } else {
            vec![]
        };
        decision.required_services = required_services;
        decision
    }

    /// In-effect, well-formed rules matching the order, in evaluation order
    fn matching_rules<'a>(
        &self,
        rules: &'a [ShippingZoneRule],
        ctx: &OrderContext,
        state_code: &str,
        now: DateTime<Utc>,
    ) -> Vec<&'a ShippingZoneRule> {
        let mut matched: Vec<&ShippingZoneRule> = rules
            .iter()
            .filter(|rule| is_time_valid(rule, now))
            .filter(|rule| match malformed_reason(rule) {
                Some(reason) => {
                    tracing::warn!(
                        rule_id = rule.id,
                        rule_name = %rule.name,
                        reason,
                        "Skipping malformed shipping rule"
                    );
                    false
                }
                None => true,
            })
            .filter(|rule| matches_conditions(&rule.conditions, ctx, state_code))
            .collect();
        sort_rules_by_priority(&mut matched);
        matched
    }

    fn block_message(&self, rule: &ShippingZoneRule) -> String {
        rule.actions
            .block_message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.settings.default_block_message.clone())
    }
}

/// Sort rules by priority ascending; equal priorities keep creation order
pub fn sort_rules_by_priority(rules: &mut [&ShippingZoneRule]) {
    rules.sort_by_key(|rule| (rule.priority, rule.created_at, rule.id));
}

/// Decimal from the shortest decimal text of the float (0.1 stays 0.1)
fn to_decimal(value: Option<f64>) -> Decimal {
    value
        .and_then(|v| v.to_string().parse().ok().or_else(|| Decimal::from_f64(v)))
        .unwrap_or_default()
}

/// Totals are returned unrounded; `Surcharge::apply_to` rounds the final cost
fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone};
    use storefront_shared::ErrorCode;
    use storefront_shared::models::{
        RuleActions, RuleConditions, RuleType, ZoneConditions, ZoneStatus, find_state,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap()
    }

    fn make_rule(id: i64, priority: i32, actions: RuleActions) -> ShippingZoneRule {
        ShippingZoneRule {
            id,
            name: format!("rule-{}", id),
            rule_type: RuleType::Surcharge,
            priority,
            conditions: RuleConditions::default(),
            actions,
            effective_start: None,
            effective_end: None,
            is_active: true,
            created_at: id,
            updated_at: id,
        }
    }

    fn surcharge(amount: f64) -> RuleActions {
        RuleActions {
            surcharge_amount: Some(amount),
            ..Default::default()
        }
    }

    fn blocking(message: &str) -> RuleActions {
        RuleActions {
            block: true,
            block_message: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn zone(code: &str, status: ZoneStatus) -> ShippingZone {
        let mut zone = ShippingZone::default_for(find_state(code).unwrap());
        zone.id = Some(1);
        zone.status = status;
        zone
    }

    fn summer_heat_block() -> ShippingZoneRule {
        let mut rule = make_rule(
            1,
            1,
            RuleActions {
                block: true,
                block_message: Some("No shipping in summer heat".to_string()),
                ..Default::default()
            },
        );
        rule.name = "Summer Heat Block".to_string();
        rule.rule_type = RuleType::SeasonalBlock;
        rule.conditions = RuleConditions {
            states: Some(vec!["GA".to_string()]),
            months: Some(vec![6, 7, 8]),
            ..Default::default()
        };
        rule
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_zone_allows_everything() {
        let evaluator = EligibilityEvaluator::default();
        let registry = ZoneRegistry::default();

        for state in storefront_shared::models::US_STATES.iter() {
            let decision = evaluator
                .evaluate(&registry, &[], &OrderContext::new(state.code), now())
                .unwrap();
            assert!(decision.allowed);
            assert!(decision.surcharge.is_zero());
            assert!(decision.required_services.is_empty());
            assert_eq!(decision.available_services.len(), 3);
        }
    }

    #[test]
    fn test_invalid_state_code_is_error() {
        let evaluator = EligibilityEvaluator::default();
        let err = evaluator
            .evaluate(&ZoneRegistry::default(), &[], &OrderContext::new("ZZ"), now())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateCode);
    }

    #[test]
    fn test_blocked_zone_ignores_rules() {
        let evaluator = EligibilityEvaluator::default();
        let mut hi = zone("HI", ZoneStatus::Blocked);
        hi.customer_message = Some("No shipping to Hawaii".to_string());
        let rules = vec![make_rule(1, 0, surcharge(5.0))];

        let decision = evaluator.evaluate_zone(&hi, &rules, &OrderContext::new("HI"), now());
        assert!(!decision.allowed);
        assert_eq!(decision.block_reason, Some(BlockReason::ZoneBlocked));
        assert_eq!(decision.messages, vec!["No shipping to Hawaii".to_string()]);
        assert!(decision.surcharge.is_zero());
        assert!(decision.applied_rules.is_empty());
        assert!(decision.available_services.is_empty());
    }

    #[test]
    fn test_blocked_zone_default_message() {
        let evaluator = EligibilityEvaluator::default();
        let decision = evaluator.evaluate_zone(
            &zone("AK", ZoneStatus::Blocked),
            &[],
            &OrderContext::new("AK"),
            now(),
        );
        assert_eq!(
            decision.messages,
            vec![evaluator.settings().default_block_message.clone()]
        );
    }

    #[test]
    fn test_conditional_zone_all_conditions_required() {
        let evaluator = EligibilityEvaluator::default();
        let mut az = zone("AZ", ZoneStatus::Conditional);
        az.conditions = Some(ZoneConditions {
            max_transit_days: Some(3),
            min_order_value: Some(50.0),
            ..Default::default()
        });

        let slow = OrderContext::new("AZ").with_transit_days(5).with_order_value(100.0);
        let decision = evaluator.evaluate_zone(&az, &[], &slow, now());
        assert!(!decision.allowed);
        assert_eq!(decision.block_reason, Some(BlockReason::TransitExceeded));

        let fast = OrderContext::new("AZ").with_transit_days(2).with_order_value(100.0);
        assert!(evaluator.evaluate_zone(&az, &[], &fast, now()).allowed);
    }

    #[test]
    fn test_zone_pass_still_runs_rules() {
        let evaluator = EligibilityEvaluator::default();
        let mut az = zone("AZ", ZoneStatus::Conditional);
        az.conditions = Some(ZoneConditions {
            min_order_value: Some(50.0),
            ..Default::default()
        });
        let rules = vec![make_rule(1, 0, blocking("Closed for inventory"))];

        let ctx = OrderContext::new("AZ").with_order_value(100.0);
        let decision = evaluator.evaluate_zone(&az, &rules, &ctx, now());
        assert!(!decision.allowed);
        assert_eq!(decision.block_reason, Some(BlockReason::Rule { rule_id: 1 }));
    }

    #[test]
    fn test_priority_ordering_keeps_earlier_surcharge() {
        let evaluator = EligibilityEvaluator::default();
        let ca_only = RuleConditions {
            states: Some(vec!["CA".to_string()]),
            ..Default::default()
        };
        let mut block_a = make_rule(1, 10, blocking("CA closed"));
        block_a.conditions = ca_only.clone();
        let mut surcharge_b = make_rule(2, 5, surcharge(4.5));
        surcharge_b.conditions = ca_only;
        let late_c = make_rule(3, 20, surcharge(100.0));

        let rules = vec![block_a, late_c, surcharge_b];
        let decision = evaluator.evaluate_zone(
            &zone("CA", ZoneStatus::Allowed),
            &rules,
            &OrderContext::new("CA"),
            now(),
        );

        assert!(!decision.allowed);
        assert_eq!(decision.surcharge.amount, 4.5);
        assert_eq!(decision.messages, vec!["CA closed".to_string()]);
        let applied: Vec<(i64, bool)> = decision
            .applied_rules
            .iter()
            .map(|r| (r.rule_id, r.blocked))
            .collect();
        assert_eq!(applied, vec![(2, false), (1, true)]);
    }

    #[test]
    fn test_rule_without_states_matches_any_state() {
        let evaluator = EligibilityEvaluator::default();
        let rules = vec![make_rule(1, 0, surcharge(2.0))];
        for code in ["AL", "NY", "WA"] {
            let decision =
                evaluator.evaluate_zone(&zone(code, ZoneStatus::Allowed), &rules, &OrderContext::new(code), now());
            assert_eq!(decision.surcharge.amount, 2.0);
        }
    }

    #[test]
    fn test_expired_rule_never_matches() {
        let evaluator = EligibilityEvaluator::default();
        let mut rule = make_rule(1, 0, blocking("expired"));
        rule.effective_end = Some(now() - Duration::days(1));

        let decision = evaluator.evaluate_zone(
            &zone("OR", ZoneStatus::Allowed),
            &[rule],
            &OrderContext::new("OR"),
            now(),
        );
        assert!(decision.allowed);
        assert!(decision.applied_rules.is_empty());
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let evaluator = EligibilityEvaluator::default();
        let registry = ZoneRegistry::default();
        let rules = vec![
            make_rule(1, 3, surcharge(1.25)),
            make_rule(2, 1, RuleActions {
                required_services: Some(vec!["two_day".to_string()]),
                surcharge_percent: Some(10.0),
                ..Default::default()
            }),
        ];
        let ctx = OrderContext::new("MI").with_order_date(date(2025, 2, 1));

        let first = evaluator.evaluate(&registry, &rules, &ctx, now()).unwrap();
        let second = evaluator.evaluate(&registry, &rules, &ctx, now()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_surcharges_stack_and_services_union() {
        let evaluator = EligibilityEvaluator::default();
        let rules = vec![
            make_rule(1, 0, RuleActions {
                required_services: Some(vec!["overnight".to_string(), "two_day".to_string()]),
                surcharge_amount: Some(0.1),
                surcharge_percent: Some(5.0),
                ..Default::default()
            }),
            make_rule(2, 1, RuleActions {
                required_services: Some(vec!["overnight".to_string()]),
                surcharge_amount: Some(0.2),
                surcharge_percent: Some(2.5),
                ..Default::default()
            }),
        ];

        let decision = evaluator.evaluate_zone(
            &zone("NM", ZoneStatus::Allowed),
            &rules,
            &OrderContext::new("NM"),
            now(),
        );
        assert!(decision.allowed);
        assert_eq!(decision.surcharge.amount, 0.3);
        assert_eq!(decision.surcharge.percent, 7.5);
        assert_eq!(
            decision.required_services,
            vec!["overnight".to_string(), "two_day".to_string()]
        );
        assert_eq!(decision.available_services, decision.required_services);
    }

    #[test]
    fn test_fractional_surcharges_not_rounded() {
        let evaluator = EligibilityEvaluator::default();
        let rules = vec![
            make_rule(1, 0, RuleActions {
                surcharge_amount: Some(0.004),
                surcharge_percent: Some(0.125),
                ..Default::default()
            }),
            make_rule(2, 1, RuleActions {
                surcharge_amount: Some(0.001),
                surcharge_percent: Some(0.0625),
                ..Default::default()
            }),
        ];

        let decision = evaluator.evaluate_zone(
            &zone("VT", ZoneStatus::Allowed),
            &rules,
            &OrderContext::new("VT"),
            now(),
        );
        assert_eq!(decision.surcharge.amount, 0.005);
        assert_eq!(decision.surcharge.percent, 0.1875);
        // 200 + 0.005 + 0.375 = 200.38 after rounding the final cost
        assert_eq!(decision.surcharge.apply_to(200.0), 200.38);
    }

    #[test]
    fn test_zone_required_service_joins_rule_services() {
        let evaluator = EligibilityEvaluator::default();
        let mut ak = zone("AK", ZoneStatus::Conditional);
        ak.conditions = Some(ZoneConditions {
            required_service: Some("overnight".to_string()),
            ..Default::default()
        });

        let decision = evaluator.evaluate_zone(&ak, &[], &OrderContext::new("AK"), now());
        assert!(decision.allowed);
        assert_eq!(decision.required_services, vec!["overnight".to_string()]);
        assert!(decision.is_service_selectable("overnight"));
        assert!(!decision.is_service_selectable("ground"));
    }

    #[test]
    fn test_malformed_rule_skipped() {
        let evaluator = EligibilityEvaluator::default();
        let bad = make_rule(1, 0, RuleActions {
            block: true,
            surcharge_percent: Some(250.0),
            ..Default::default()
        });
        let good = make_rule(2, 1, surcharge(3.0));

        let decision = evaluator.evaluate_zone(
            &zone("KS", ZoneStatus::Allowed),
            &[bad, good],
            &OrderContext::new("KS"),
            now(),
        );
        assert!(decision.allowed);
        assert_eq!(decision.surcharge.amount, 3.0);
    }

    #[test]
    fn test_missing_context_skips_rule() {
        let evaluator = EligibilityEvaluator::default();
        let mut rule = make_rule(1, 0, blocking("too slow"));
        rule.rule_type = RuleType::TransitLimit;
        rule.conditions.max_transit_days = Some(4);

        let unknown = OrderContext::new("ME");
        let decision = evaluator.evaluate_zone(&zone("ME", ZoneStatus::Allowed), &[rule.clone()], &unknown, now());
        assert!(decision.allowed);

        let slow = OrderContext::new("ME").with_transit_days(6);
        let decision = evaluator.evaluate_zone(&zone("ME", ZoneStatus::Allowed), &[rule], &slow, now());
        assert!(!decision.allowed);
    }

    #[test]
    fn test_equal_priority_uses_creation_order() {
        let evaluator = EligibilityEvaluator::default();
        let mut older = make_rule(7, 5, blocking("older"));
        older.created_at = 100;
        let mut newer = make_rule(3, 5, blocking("newer"));
        newer.created_at = 200;

        let decision = evaluator.evaluate_zone(
            &zone("VT", ZoneStatus::Allowed),
            &[newer, older],
            &OrderContext::new("VT"),
            now(),
        );
        assert_eq!(decision.messages, vec!["older".to_string()]);
    }

    #[test]
    fn test_blank_block_message_uses_default() {
        let evaluator = EligibilityEvaluator::default();
        let rule = make_rule(1, 0, blocking("  "));
        let decision = evaluator.evaluate_zone(
            &zone("IA", ZoneStatus::Allowed),
            &[rule],
            &OrderContext::new("IA"),
            now(),
        );
        assert_eq!(
            decision.messages,
            vec![evaluator.settings().default_block_message.clone()]
        );
    }

    #[test]
    fn test_summer_heat_block_in_july() {
        let evaluator = EligibilityEvaluator::default();
        let ctx = OrderContext::new("GA").with_order_date(date(2025, 7, 15));
        let decision = evaluator
            .evaluate(&ZoneRegistry::default(), &[summer_heat_block()], &ctx, now())
            .unwrap();
        assert!(!decision.allowed);
        assert_eq!(decision.messages, vec!["No shipping in summer heat".to_string()]);
    }

    #[test]
    fn test_summer_heat_block_in_november() {
        let evaluator = EligibilityEvaluator::default();
        let ctx = OrderContext::new("GA").with_order_date(date(2025, 11, 1));
        let decision = evaluator
            .evaluate(&ZoneRegistry::default(), &[summer_heat_block()], &ctx, now())
            .unwrap();
        assert!(decision.allowed);
        assert!(decision.required_services.is_empty());
        assert_eq!(decision.surcharge, Surcharge { amount: 0.0, percent: 0.0 });
        assert!(decision.messages.is_empty());
    }
}
