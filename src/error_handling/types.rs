//! Error type definitions.
//!
//! This module defines the probe error taxonomy and the start-up error types.

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{EnumCount as EnumCountMacro, EnumIter as EnumIterMacro};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure of a single measurement.
///
/// Every probe returns `Result<T, ProbeError>`; none of them panics or
/// propagates past the report builder, which substitutes placeholders.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Transport-level failure talking to a remote endpoint.
    #[error("HTTP request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The remote endpoint answered with a non-success status.
    #[error("Remote endpoint returned HTTP {0}")]
    Status(u16),

    /// A host could not be reached at all (DNS failure, refused, every attempt lost).
    #[error("Host {host} unreachable: {reason}")]
    Unreachable {
        /// Host that was probed
        host: String,
        /// What went wrong
        reason: String,
    },

    /// The probe did not finish within its budget.
    #[error("{} timed out after {}s", .what, .after.as_secs())]
    Timeout {
        /// Operation that timed out
        what: String,
        /// Budget that was exceeded
        after: Duration,
    },

    /// The reachability prober reported a loss figure that is not an integer percentage.
    #[error("Invalid packet loss value: {0:?}")]
    InvalidPacketLoss(String),

    /// The latency probe was asked to probe no hosts.
    #[error("No hosts to probe")]
    NoHosts,

    /// The geolocation provider body is not valid JSON.
    #[error("Malformed provider response: {0}")]
    Json(#[from] serde_json::Error),

    /// The geolocation provider body lacks a required field.
    #[error("Provider response missing field `{0}`")]
    Schema(&'static str),

    /// No geolocation API key is configured.
    #[error("GEO_API_KEY is not set")]
    MissingApiKey,
}

/// The independent measurements that make up one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, EnumCountMacro)]
pub enum ProbeKind {
    Download,
    Upload,
    Latency,
    Geolocation,
}

impl ProbeKind {
    /// Stable lowercase name used in logs, metrics and JSON error bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            ProbeKind::Download => "download",
            ProbeKind::Upload => "upload",
            ProbeKind::Latency => "latency",
            ProbeKind::Geolocation => "geolocation",
        }
    }
}

impl std::fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
