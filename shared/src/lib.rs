//! Shared types for the storefront shipping service
//!
//! Common types used across crates: persisted shipping records,
//! order context / decision types, US state reference data,
//! the unified error system and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
