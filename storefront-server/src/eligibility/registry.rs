//! Zone Registry
//!
//! Merges the 50-state reference table with stored zone overrides. Every
//! valid state code resolves to a zone; a state without an override gets
//! the default allowed zone.

use std::collections::HashMap;

use storefront_shared::models::{ShippingZone, US_STATES, find_state};
use storefront_shared::{AppError, AppResult};

/// Snapshot of zone overrides keyed by state code
#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    overrides: HashMap<String, ShippingZone>,
}

impl ZoneRegistry {
    pub fn new(zones: impl IntoIterator<Item = ShippingZone>) -> Self {
        let mut overrides = HashMap::new();
        for zone in zones {
            match find_state(&zone.state_code) {
                Some(state) => {
                    overrides.insert(state.code.to_string(), zone);
                }
                None => {
                    tracing::warn!(
                        state_code = %zone.state_code,
                        "Ignoring zone override for unknown state"
                    );
                }
            }
        }
        Self { overrides }
    }

    /// Resolve the zone for a state code (trimmed, case-insensitive)
    pub fn lookup(&self, state_code: &str) -> AppResult<ShippingZone> {
        let state = find_state(state_code).ok_or_else(|| AppError::invalid_state_code(state_code))?;
        Ok(self
            .overrides
            .get(state.code)
            .cloned()
            .unwrap_or_else(|| ShippingZone::default_for(state)))
    }

    /// All 50 zones ordered by state code
    pub fn list(&self) -> Vec<ShippingZone> {
        US_STATES
            .iter()
            .map(|state| {
                self.overrides
                    .get(state.code)
                    .cloned()
                    .unwrap_or_else(|| ShippingZone::default_for(state))
            })
            .collect()
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}
