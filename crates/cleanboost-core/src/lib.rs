//! cleanboost-core - scan/clean orchestration client for the CleanBoost
//! backend API.
//!
//! The backend owns all scanning, file classification, and deletion; this
//! crate is the protocol consumer. Four components compose linearly:
//!
//! - [`telemetry::TelemetryPoller`] polls system utilization in the
//!   background, independent of everything else.
//! - [`scan::ScanController`] runs scan cycles: start, poll to a terminal
//!   status, expose the snapshot.
//! - [`selection::SelectionSet`] tracks the user's deletion candidates,
//!   keyed by path.
//! - [`clean::CleanupExecutor`] submits confirmed selections and reports
//!   the backend's authoritative outcome.
//!
//! [`session::CleanerSession`] ties the request/response workflows together
//! behind one state container.

pub mod api;
pub mod auth;
pub mod clean;
pub mod config;
pub mod scan;
pub mod selection;
pub mod session;
pub mod telemetry;
pub mod types;

pub use api::{ApiClient, ApiError};
pub use session::CleanerSession;

/// User Agent string for all backend requests.
pub const USER_AGENT: &str = concat!("cleanboost-core/", env!("CARGO_PKG_VERSION"));
