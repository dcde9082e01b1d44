//! Application configuration and constants.
//!
//! This module provides:
//! - Measurement constants (endpoints, payload sizes, timeouts)
//! - CLI/environment option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, GeoSchema, LogFormat, LogLevel};
