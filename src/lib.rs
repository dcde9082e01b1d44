//! speed_check library: client network diagnostics over HTTP
//!
//! This library serves a page and a JSON endpoint that report a client's
//! download/upload throughput, round-trip latency to a fixed set of hosts, and
//! coarse geolocation derived from the client's IP address.
//!
//! # Example
//!
//! ```no_run
//! use speed_check::{run_server, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     port: 8080,
//!     geo_api_key: std::env::var("GEO_API_KEY").ok(),
//!     ..Default::default()
//! };
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod config;
pub mod error_handling;
pub mod geoip;
pub mod initialization;
pub mod latency;
pub mod report;
pub mod server;
pub mod throughput;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::geoip::HttpGeoLookup;
use crate::initialization::init_client;
use crate::latency::TcpReachabilityProbe;
use crate::report::{Probes, ReportBuilder};
use crate::server::{router, start_server, AppState};
use crate::throughput::HttpBandwidthMeter;

// Re-export public API
pub use config::{Config, GeoSchema, LogFormat, LogLevel};
pub use error_handling::{ProbeError, ProbeKind};
pub use report::DiagnosticsReport;

/// Builds the production probes from `config`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created.
pub fn build_probes(config: &Config) -> Result<Probes> {
    let client = init_client().context("Failed to initialize HTTP client")?;

    if config.geo_api_key.is_none() {
        log::warn!(
            "{} is not set; geolocation will report placeholders",
            config::GEO_API_KEY_ENV
        );
    }

    Ok(Probes {
        bandwidth: Arc::new(HttpBandwidthMeter::new(client.clone())),
        reachability: Arc::new(TcpReachabilityProbe::default()),
        geo: Arc::new(HttpGeoLookup::new(
            client,
            config.geo_endpoint.clone(),
            config.geo_api_key.clone(),
            config.geo_schema,
        )),
    })
}

/// Runs the HTTP server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the probes cannot be initialized, the listen address
/// cannot be bound, or the server fails.
pub async fn run_server(config: Config) -> Result<()> {
    let probes = build_probes(&config)?;
    let state = AppState::new(ReportBuilder::new(probes));

    if !config.static_dir.is_dir() {
        log::warn!(
            "Static directory {} does not exist; assets will 404",
            config.static_dir.display()
        );
    }
    let app = router(state, &config.static_dir);

    start_server(config.listen_addr(), app).await
}
