//! Data models
//!
//! Shared between storefront-server and the admin frontend (via API).
//! Record ids are `i64` snowflakes; timestamps are Unix millis except the
//! rule effective window, which is RFC 3339 on the wire.

pub mod serde_helpers;
pub mod shipping_decision;
pub mod shipping_rule;
pub mod shipping_settings;
pub mod shipping_zone;
pub mod us_state;

// Re-exports
pub use shipping_decision::*;
pub use shipping_rule::*;
pub use shipping_settings::*;
pub use shipping_zone::*;
pub use us_state::*;
