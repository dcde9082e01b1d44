//! Error handling and probe statistics.
//!
//! This module provides:
//! - The `ProbeError` taxonomy shared by every measurement
//! - Start-up error types
//! - Failure counters per probe kind

mod stats;
mod types;

// Re-export public API
pub use stats::ProbeStats;
pub use types::{InitializationError, ProbeError, ProbeKind};
