//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 3xxx: Tenant errors
/// - 4xxx: Report engine errors
/// - 5xxx: Inventory errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Tenant errors (3xxx)
    Tenant,
    /// Report engine errors (4xxx)
    Report,
    /// Inventory errors (5xxx)
    Inventory,
    /// System errors (9xxx)
    System,
}

impl ErrorCode {
    /// Get the category of this error code
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            0..=999 => ErrorCategory::General,
            1000..=1999 => ErrorCategory::Auth,
            3000..=3999 => ErrorCategory::Tenant,
            4000..=4999 => ErrorCategory::Report,
            5000..=5999 => ErrorCategory::Inventory,
            _ => ErrorCategory::System,
        }
    }
}
