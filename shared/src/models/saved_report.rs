//! Saved report model
//!
//! A saved report is the serialized [`ReportConfig`] stored verbatim
//! for later replay. It owns no live state.

use serde::{Deserialize, Serialize};

use super::report::ReportConfig;

/// Saved report entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedReport {
    pub id: String,
    pub tenant_id: String,
    /// Recorded for display only, not authorization
    pub user_id: Option<String>,
    pub name: String,
    pub config: ReportConfig,
    /// Epoch milliseconds
    pub created_at: i64,
}

/// Create saved report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedReportCreate {
    pub name: String,
    pub config: ReportConfig,
}
