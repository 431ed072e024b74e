//! Ad-hoc report engine
//!
//! A declarative [`shared::models::ReportConfig`] is compiled against
//! the source registry into a tenant-scoped query, executed, and
//! optionally reduced in memory:
//!
//! registry → filter compiler → query executor → aggregator → result

pub mod aggregate;
pub mod executor;
pub mod filter;
pub mod sources;

pub use executor::execute_report;
