//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration. Every option can also be supplied through the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_GEO_ENDPOINT, DEFAULT_PORT, DEFAULT_STATIC_DIR};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Response schema spoken by the geolocation provider.
///
/// Each variant has exactly one parsing function in `geoip::provider`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GeoSchema {
    /// ipgeolocation.io style: flat `isp`, `organization`, `state_prov`, `country_name`
    Ipgeolocation,
    /// abstractapi style: nested `connection.isp_name`, `region`, `country`
    Abstract,
}

/// Server configuration.
///
/// Parsed from the command line with environment fallbacks, or constructed
/// programmatically for tests.
///
/// # Examples
///
/// ```bash
/// # Defaults: listen on 0.0.0.0:3000, key from GEO_API_KEY
/// GEO_API_KEY=... speed_check
///
/// # Different port and JSON logs
/// PORT=8080 speed_check --log-format json
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "speed_check",
    about = "Serves a page reporting the client's throughput, latency and geolocation."
)]
pub struct Config {
    /// Listen port
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Listen address
    #[arg(long = "bind", env = "BIND_ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind_address: IpAddr,

    /// Geolocation provider API key.
    ///
    /// Without a key every geolocation lookup fails and the page shows the
    /// error placeholders.
    #[arg(long, env = "GEO_API_KEY", hide_env_values = true)]
    pub geo_api_key: Option<String>,

    /// Geolocation provider endpoint
    #[arg(long, env = "GEO_ENDPOINT", default_value = DEFAULT_GEO_ENDPOINT)]
    pub geo_endpoint: String,

    /// Response schema of the geolocation provider: ipgeolocation|abstract
    #[arg(long, env = "GEO_SCHEMA", value_enum, default_value_t = GeoSchema::Ipgeolocation)]
    pub geo_schema: GeoSchema,

    /// Directory served for static assets
    #[arg(long, env = "STATIC_DIR", default_value = DEFAULT_STATIC_DIR)]
    pub static_dir: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// Socket address the server binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            geo_api_key: None,
            geo_endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            geo_schema: GeoSchema::Ipgeolocation,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
