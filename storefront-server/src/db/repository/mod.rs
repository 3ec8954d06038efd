//! Repository Module
//!
//! CRUD over the in-memory tables. Repositories are thin handles around a
//! cloned [`Database`](super::Database) and enforce the admin editor rules on
//! write; reads return records exactly as stored.

pub mod shipping_rule;
pub mod shipping_zone;

// Re-exports
pub use shipping_rule::ShippingRuleRepository;
pub use shipping_zone::ShippingZoneRepository;

use storefront_shared::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Shipping rule {0} not found")]
    RuleNotFound(i64),

    #[error("No zone override for {0}")]
    ZoneNotFound(String),

    #[error("Invalid US state code: '{0}'")]
    InvalidStateCode(String),

    #[error("Shipping rule name is required")]
    RuleNameRequired,

    #[error("Effective start is after effective end")]
    InvalidEffectiveWindow,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Snapshot corrupted: {0}")]
    Corrupted(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::RuleNotFound(id) => AppError::rule_not_found(id),
            RepoError::ZoneNotFound(code) => AppError::zone_not_found(code),
            RepoError::InvalidStateCode(code) => AppError::invalid_state_code(code),
            RepoError::RuleNameRequired => AppError::new(ErrorCode::RuleNameRequired),
            RepoError::InvalidEffectiveWindow => AppError::new(ErrorCode::InvalidEffectiveWindow),
            RepoError::Storage(msg) => AppError::storage(msg),
            RepoError::Corrupted(msg) => AppError::with_message(ErrorCode::StorageCorrupted, msg),
        }
    }
}
