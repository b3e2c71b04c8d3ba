//! Health monitoring module
//!
//! This module compares the local light node against the reference endpoint.

pub mod monitor;
pub mod types;

pub use monitor::HealthMonitor;
pub use types::{CheckOutcome, CheckStage, LocalFailure};
