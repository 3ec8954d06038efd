//! Shipping Eligibility Module
//!
//! Decides whether an order may ship to its destination state, which
//! services it may use and what surcharge applies. The zone check runs
//! first; rules are evaluated only when the zone lets the order through.

mod evaluator;
pub mod matcher;
mod registry;
mod zone_check;

pub use evaluator::*;
pub use matcher::*;
pub use registry::*;
pub use zone_check::*;
