//! Shipping Zone Model

use super::serde_helpers;
use super::us_state::UsState;
use serde::{Deserialize, Serialize};

/// Zone status enum
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ZoneStatus {
    #[default]
    Allowed,
    Blocked,
    Conditional,
}

/// Restrictions applied to a conditional zone.
///
/// Every field is optional; a `None` field places no restriction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ZoneConditions {
    /// Shipping service the order must use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_service: Option<String>,
    /// Months (1-12) in which shipping is refused
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_months: Option<Vec<u32>>,
    /// Minimum order value
    #[serde(
        default,
        deserialize_with = "serde_helpers::option_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_order_value: Option<f64>,
    /// Maximum carrier transit time in days
    #[serde(
        default,
        deserialize_with = "serde_helpers::option_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_transit_days: Option<i32>,
}

impl ZoneConditions {
    /// True when no restriction is set
    pub fn is_empty(&self) -> bool {
        self.required_service.is_none()
            && self.blocked_months.is_none()
            && self.min_order_value.is_none()
            && self.max_transit_days.is_none()
    }
}

/// Shipping zone entity (one per overridden US state)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingZone {
    /// `None` for a synthesized default zone (no stored override)
    pub id: Option<i64>,
    pub state_code: String,
    pub state_name: String,
    pub status: ZoneStatus,
    /// Only meaningful when `status` is [`ZoneStatus::Conditional`]
    #[serde(default)]
    pub conditions: Option<ZoneConditions>,
    #[serde(default)]
    pub customer_message: Option<String>,
    #[serde(default)]
    pub internal_notes: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl ShippingZone {
    /// Default zone for a state with no stored override: allowed, unconditioned
    pub fn default_for(state: &UsState) -> Self {
        Self {
            id: None,
            state_code: state.code.to_string(),
            state_name: state.name.to_string(),
            status: ZoneStatus::Allowed,
            conditions: None,
            customer_message: None,
            internal_notes: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    /// Whether this zone was synthesized rather than loaded from storage
    pub fn is_default(&self) -> bool {
        self.id.is_none()
    }

    /// Conditions that take part in evaluation.
    ///
    /// Conditions stored on a non-conditional zone are ignored.
    pub fn active_conditions(&self) -> Option<&ZoneConditions> {
        match self.status {
            ZoneStatus::Conditional => self.conditions.as_ref(),
            _ => None,
        }
    }
}

/// Create / replace zone override payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingZoneUpsert {
    pub status: ZoneStatus,
    pub conditions: Option<ZoneConditions>,
    pub customer_message: Option<String>,
    pub internal_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::us_state::find_state;

    #[test]
    fn test_default_zone_is_allowed() {
        let zone = ShippingZone::default_for(find_state("TX").unwrap());
        assert_eq!(zone.state_code, "TX");
        assert_eq!(zone.state_name, "Texas");
        assert_eq!(zone.status, ZoneStatus::Allowed);
        assert!(zone.conditions.is_none());
        assert!(zone.is_default());
    }

    #[test]
    fn test_conditions_ignored_unless_conditional() {
        let mut zone = ShippingZone::default_for(find_state("AZ").unwrap());
        zone.conditions = Some(ZoneConditions {
            max_transit_days: Some(2),
            ..Default::default()
        });
        assert!(zone.active_conditions().is_none());

        zone.status = ZoneStatus::Conditional;
        assert_eq!(zone.active_conditions().unwrap().max_transit_days, Some(2));
    }

    #[test]
    fn test_zone_deserialize_from_row() {
        let json = r#"{
            "id": 7,
            "state_code": "AZ",
            "state_name": "Arizona",
            "status": "conditional",
            "conditions": {"blocked_months": [6, 7, 8], "min_order_value": "50"},
            "customer_message": "Summer shipping is paused"
        }"#;
        let zone: ShippingZone = serde_json::from_str(json).unwrap();
        assert_eq!(zone.status, ZoneStatus::Conditional);
        let conditions = zone.conditions.unwrap();
        assert_eq!(conditions.blocked_months, Some(vec![6, 7, 8]));
        assert_eq!(conditions.min_order_value, Some(50.0));
        assert!(conditions.required_service.is_none());
        assert!(!conditions.is_empty());
    }

    #[test]
    fn test_status_serialize() {
        assert_eq!(
            serde_json::to_string(&ZoneStatus::Conditional).unwrap(),
            "\"conditional\""
        );
    }
}
