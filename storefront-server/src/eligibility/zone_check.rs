//! Zone Check
//!
//! First stage of evaluation: the destination zone's status and, for
//! conditional zones, its restrictions. Any single failing restriction
//! disqualifies the order; there is no partial scoring.

use storefront_shared::models::{
    BlockReason, OrderContext, ShippingZone, ZoneConditions, ZoneStatus,
};

/// Result of checking an order against its destination zone
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneOutcome {
    /// Zone lets the order through to rule evaluation
    Pass {
        /// Service the zone requires when the order did not name one yet
        required_service: Option<String>,
    },
    /// Zone refuses the order
    Blocked {
        reason: BlockReason,
        message: Option<String>,
    },
}

/// Check an order against its zone
pub fn check_zone(zone: &ShippingZone, ctx: &OrderContext) -> ZoneOutcome {
    match zone.status {
        ZoneStatus::Allowed => ZoneOutcome::Pass {
            required_service: None,
        },
        ZoneStatus::Blocked => ZoneOutcome::Blocked {
            reason: BlockReason::ZoneBlocked,
            message: zone.customer_message.clone(),
        },
        ZoneStatus::Conditional => match zone.active_conditions() {
            Some(conditions) => check_conditions(zone, conditions, ctx),
            None => ZoneOutcome::Pass {
                required_service: None,
            },
        },
    }
}

fn check_conditions(
    zone: &ShippingZone,
    conditions: &ZoneConditions,
    ctx: &OrderContext,
) -> ZoneOutcome {
    let mut pending_service = None;

    if let Some(required) = conditions.required_service.as_deref() {
        match ctx.service.as_deref() {
            Some(service) if !service.eq_ignore_ascii_case(required) => {
                return blocked(zone, conditions, BlockReason::ServiceMismatch);
            }
            Some(_) => {}
            None => pending_service = Some(required.to_string()),
        }
    }

    if let (Some(months), Some(month)) = (&conditions.blocked_months, ctx.order_month())
        && months.contains(&month)
    {
        return blocked(zone, conditions, BlockReason::Seasonal);
    }

    if let (Some(min), Some(value)) = (conditions.min_order_value, ctx.order_value)
        && value < min
    {
        return blocked(zone, conditions, BlockReason::BelowMinimumOrderValue);
    }

    if let (Some(max), Some(days)) = (conditions.max_transit_days, ctx.transit_days)
        && days > max
    {
        return blocked(zone, conditions, BlockReason::TransitExceeded);
    }

    ZoneOutcome::Pass {
        required_service: pending_service,
    }
}

fn blocked(zone: &ShippingZone, conditions: &ZoneConditions, reason: BlockReason) -> ZoneOutcome {
    let message = zone
        .customer_message
        .clone()
        .or_else(|| default_message(zone, conditions, reason));
    ZoneOutcome::Blocked { reason, message }
}

/// Customer-facing text for a failed restriction when the zone has none
fn default_message(
    zone: &ShippingZone,
    conditions: &ZoneConditions,
    reason: BlockReason,
) -> Option<String> {
    let state = &zone.state_name;
    match reason {
        BlockReason::ServiceMismatch => conditions
            .required_service
            .as_ref()
            .map(|service| format!("Orders to {} must ship with {}", state, service)),
        BlockReason::Seasonal => Some(format!(
            "Shipping to {} is paused for this month",
            state
        )),
        BlockReason::BelowMinimumOrderValue => conditions
            .min_order_value
            .map(|min| format!("Orders to {} must be at least {:.2}", state, min)),
        BlockReason::TransitExceeded => conditions
            .max_transit_days
            .map(|days| format!("Orders to {} must arrive within {} days", state, days)),
        BlockReason::ZoneBlocked | BlockReason::Rule { .. } => None,
    }
}
