//! Unified error codes for the Quipu platform
//!
//! Error codes are shared between the reporting service and the
//! platform frontend. They are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 3xxx: Tenant errors
//! - 4xxx: Report engine errors
//! - 5xxx: Inventory errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient
/// serialization and cross-language compatibility (Rust, TypeScript).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Auth ====================
    /// Request carries no tenant identity
    NotAuthenticated = 1001,

    // ==================== 3xxx: Tenant ====================
    /// Tenant not found
    TenantNotFound = 3001,

    // ==================== 4xxx: Report engine ====================
    /// Report source id is not in the source registry
    SourceNotFound = 4001,
    /// group_by set without a legal metric / metric_column pairing
    InvalidAggregation = 4002,
    /// The underlying store rejected the compiled query
    QueryExecutionFailed = 4003,
    /// date_from is after date_to, or a date failed to parse
    InvalidDateRange = 4004,
    /// Saved report not found
    SavedReportNotFound = 4005,

    // ==================== 5xxx: Inventory ====================
    /// Inventory rollup failed while joining sales data
    TurnoverJoinFailed = 5001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::NotAuthenticated => "Tenant identity required",
            Self::TenantNotFound => "Tenant not found",
            Self::SourceNotFound => "Report source not found",
            Self::InvalidAggregation => "Invalid aggregation specification",
            Self::QueryExecutionFailed => "Report query execution failed",
            Self::InvalidDateRange => "Invalid date range",
            Self::SavedReportNotFound => "Saved report not found",
            Self::TurnoverJoinFailed => "Turnover sales join failed",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
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
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            1001 => Self::NotAuthenticated,
            3001 => Self::TenantNotFound,
            4001 => Self::SourceNotFound,
            4002 => Self::InvalidAggregation,
            4003 => Self::QueryExecutionFailed,
            4004 => Self::InvalidDateRange,
            4005 => Self::SavedReportNotFound,
            5001 => Self::TurnoverJoinFailed,
            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
