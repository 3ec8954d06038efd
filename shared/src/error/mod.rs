//! Unified error system for the storefront
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: JSON body of every error response
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Shipping errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use storefront_shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::invalid_state_code("ZZ");
//! assert_eq!(err.code, ErrorCode::InvalidStateCode);
//!
//! let response = ApiResponse::error(&err);
//! assert_eq!(response.code, 4001);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
