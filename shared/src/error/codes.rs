//! Unified error codes for the storefront
//!
//! This module defines all error codes used by the shipping service and
//! its admin frontend. Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Shipping errors (zones, rules, eligibility input)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// No route for the request path
    NotFound = 3,
    /// Path or query parameters could not be parsed
    InvalidRequest = 5,
    /// Request body is not a valid payload
    InvalidFormat = 6,

    // ==================== 4xxx: Shipping ====================
    /// State code is not one of the 50 US states
    InvalidStateCode = 4001,
    /// No zone override stored for the state
    ZoneNotFound = 4002,
    /// Shipping rule not found
    RuleNotFound = 4003,
    /// Shipping rule name is empty
    RuleNameRequired = 4004,
    /// Rule effective window is inverted
    InvalidEffectiveWindow = 4006,

    // ==================== 9xxx: System ====================
    /// Storage error (snapshot read/write)
    StorageError = 9002,
    /// Storage corrupted (snapshot file damaged)
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Shipping
            ErrorCode::InvalidStateCode => "Invalid US state code",
            ErrorCode::ZoneNotFound => "Shipping zone not found",
            ErrorCode::RuleNotFound => "Shipping rule not found",
            ErrorCode::RuleNameRequired => "Shipping rule name is required",
            ErrorCode::InvalidEffectiveWindow => "Effective start is after effective end",

            // System
            ErrorCode::StorageError => "Storage error",
            ErrorCode::StorageCorrupted => "Storage corrupted (snapshot file damaged)",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            // Shipping
            4001 => Ok(ErrorCode::InvalidStateCode),
            4002 => Ok(ErrorCode::ZoneNotFound),
            4003 => Ok(ErrorCode::RuleNotFound),
            4004 => Ok(ErrorCode::RuleNameRequired),
            4006 => Ok(ErrorCode::InvalidEffectiveWindow),

            // System
            9002 => Ok(ErrorCode::StorageError),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
