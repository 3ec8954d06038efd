//! Shipping Settings
//!
//! Store-wide shipping configuration handed to the evaluator by value.

use serde::{Deserialize, Serialize};

/// Fallback text when a blocking rule or zone carries no message of its own
pub const DEFAULT_BLOCK_MESSAGE: &str = "Shipping is not available for this order";

/// Store-wide shipping settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingSettings {
    /// Every service the store offers, in display order
    pub available_services: Vec<String>,
    /// Message used when a block carries none
    pub default_block_message: String,
}

impl ShippingSettings {
    /// Services a customer may select given the accumulated restrictions.
    ///
    /// An empty restriction list leaves every offered service selectable.
    pub fn selectable_services(&self, required: &[String]) -> Vec<String> {
        if required.is_empty() {
            self.available_services.clone()
        } else {
            required.to_vec()
        }
    }
}

impl Default for ShippingSettings {
    fn default() -> Self {
        Self {
            available_services: vec![
                "ground".to_string(),
                "two_day".to_string(),
                "overnight".to_string(),
            ],
            default_block_message: DEFAULT_BLOCK_MESSAGE.to_string(),
        }
    }
}
