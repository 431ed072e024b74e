//! Shared types for the Quipu reporting service
//!
//! Common types used across crates: the unified error system, the
//! ad-hoc report contract, and the inventory analytics models.

pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
