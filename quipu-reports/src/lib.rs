//! quipu-reports — analytics/reporting engine for the Quipu platform
//!
//! Two layers over the tenant-scoped store:
//! - a generic ad-hoc report builder ([`reports`]) compiling a
//!   declarative config into a query with optional in-memory
//!   aggregation, and
//! - fixed-shape inventory rollups ([`inventory`]) whose joins and
//!   business thresholds are too specific for the generic path.
//!
//! The engine is stateless and request-scoped: every call takes the
//! tenant id (and optional branch) explicitly.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod inventory;
pub mod reports;
pub mod state;
