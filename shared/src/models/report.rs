//! Ad-hoc report builder models
//!
//! The declarative contract between the platform frontend and the
//! report engine: a [`ReportConfig`] selects a registered source,
//! narrows it with filters and a mandatory date range, and optionally
//! reduces it with a group-by + metric. Results come back as a
//! [`ReportResult`] of loosely-typed rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A report row: an open-ended bag of fields keyed by column name.
///
/// Rows arrive from the store as JSONB documents; the engine never
/// assumes a closed shape beyond what the source registry declares.
pub type Row = serde_json::Map<String, Value>;

/// Declared type of a reportable column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Number,
    Date,
    Boolean,
}

/// One column of a registered report source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    /// Legal as a metric target (monetary / quantity fields)
    #[serde(default)]
    pub aggregatable: bool,
}

/// A registered, reportable business entity
///
/// Immutable, registered at startup. `date_field` is the primary time
/// dimension; every query against the source is time-bounded on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSource {
    pub id: String,
    pub label: String,
    pub table: String,
    pub date_field: String,
    pub columns: Vec<ColumnDef>,
}

impl ReportSource {
    /// Look up a column of this source by key
    pub fn column(&self, key: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.key == key)
    }
}

/// Filter operator vocabulary (fixed, validated before compilation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    /// Case-insensitive substring match
    Like,
    /// Null test (value is ignored)
    IsNull,
}

/// One filter clause of a report config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFilter {
    pub column: String,
    #[serde(rename = "operator")]
    pub op: FilterOp,
    #[serde(default)]
    pub value: Value,
}

/// Aggregation metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Count,
    Sum,
    Avg,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Avg => "avg",
        }
    }
}

fn default_limit() -> i64 {
    100
}

/// Declarative specification of one ad-hoc report request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    pub source_id: String,
    /// Explicit column selection; empty means all fields
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub filters: Vec<ReportFilter>,
    #[serde(default)]
    pub group_by: Option<String>,
    #[serde(default)]
    pub metric: Option<Metric>,
    #[serde(default)]
    pub metric_column: Option<String>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    /// Row cap applied after ordering; aggregation operates on at most
    /// this many rows
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Finalized output of one report execution
///
/// `total` is the full matched-row count when not aggregated, or the
/// produced group count when aggregated. When rows exist their first
/// row's key set defines `columns`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub total: i64,
    pub aggregated: bool,
}
