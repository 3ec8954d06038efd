//! Error types and API response structures

use super::codes::ErrorCode;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type for the storefront, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a not found error for an unrouted path
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StorageError, msg)
    }

    /// Create an invalid request error (unparseable path or query)
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create an invalid format error (unreadable request body)
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidFormat, msg)
    }

    /// Create an invalid state code error (input is not one of the 50 states)
    pub fn invalid_state_code(code: impl Into<String>) -> Self {
        let c = code.into();
        Self::with_message(
            ErrorCode::InvalidStateCode,
            format!("Invalid US state code: '{}'", c),
        )
        .with_detail("state_code", c)
    }

    /// Create a zone not found error (no stored override for the state)
    pub fn zone_not_found(code: impl Into<String>) -> Self {
        let c = code.into();
        Self::with_message(
            ErrorCode::ZoneNotFound,
            format!("No shipping zone override for '{}'", c),
        )
        .with_detail("state_code", c)
    }

    /// Create a rule not found error
    pub fn rule_not_found(id: i64) -> Self {
        Self::with_message(
            ErrorCode::RuleNotFound,
            format!("Shipping rule {} not found", id),
        )
        .with_detail("id", id)
    }
}

/// Error response body
///
/// Every failed request answers with this shape:
/// - `code`: Error code (see [`ErrorCode`])
/// - `message`: Human-readable message
/// - `details`: Additional error details, when present
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    /// Build the response body for an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::error(&self);

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_format(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::RuleNotFound);
        assert_eq!(err.code, ErrorCode::RuleNotFound);
        assert_eq!(err.message, "Shipping rule not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::invalid_format("Failed to parse the request body")
            .with_detail("field", "priority")
            .with_detail("reason", "not a number");

        assert_eq!(err.code, ErrorCode::InvalidFormat);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "priority");
        assert_eq!(details.get("reason").unwrap(), "not a number");
    }

    #[test]
    fn test_invalid_state_code() {
        let err = AppError::invalid_state_code("ZZ");
        assert_eq!(err.code, ErrorCode::InvalidStateCode);
        assert_eq!(err.message, "Invalid US state code: 'ZZ'");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.details.unwrap().get("state_code").unwrap(), "ZZ");
    }

    #[test]
    fn test_rule_not_found() {
        let err = AppError::rule_not_found(42);
        assert_eq!(err.code, ErrorCode::RuleNotFound);
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(err.details.unwrap().get("id").unwrap(), 42);
    }

    #[test]
    fn test_not_found_names_resource() {
        let err = AppError::not_found("/api/nope");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(format!("{}", err), "/api/nope not found");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_api_response_error() {
        let err = AppError::invalid_state_code("XX");
        let response = ApiResponse::error(&err);

        assert_eq!(response.code, 4001);
        assert!(response.details.is_some());
    }

    #[test]
    fn test_api_response_serialize() {
        let response = ApiResponse::error(&AppError::new(ErrorCode::StorageError));
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"code":9002,"message":"Storage error"}"#);
    }
}
