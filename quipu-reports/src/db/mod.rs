//! Database access layer
//!
//! Runtime-bound sqlx queries against PostgreSQL. Every statement binds
//! `tenant_id`; no query in this module can cross the tenant boundary.

pub mod inventory;
pub mod report_rows;
pub mod saved_reports;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
