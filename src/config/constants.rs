//! Configuration constants.
//!
//! Measurement targets and timeouts are fixed; only the listen address, the
//! geolocation provider and logging are configurable.

use std::time::Duration;

// Throughput targets
/// Download endpoint serving a fixed-size byte stream
pub const DOWNLOAD_URL: &str = "https://eu.httpbin.org/stream-bytes/500000";
/// Expected size of the download body in bytes
pub const DOWNLOAD_SIZE_BYTES: usize = 500_000;
/// Upload endpoint host
pub const UPLOAD_HOST: &str = "www.facebook.com";
/// Upload endpoint port
pub const UPLOAD_PORT: u16 = 80;
/// Upload endpoint path
pub const UPLOAD_PATH: &str = "/catchers/544b09b4599c1d0200000289";
/// Size of the generated upload payload in bytes
pub const UPLOAD_SIZE_BYTES: usize = 200_000;

// Latency targets
/// Hosts probed for round-trip time, in probe order
pub const LATENCY_HOSTS: &[&str] = &["facebook.com", "google.com", "yahoo.com"];
/// Per-host reachability probe timeout in seconds
pub const PROBE_TIMEOUT_SECS: u64 = 5;
/// Connection attempts per host; loss is the share of attempts that failed
pub const PROBE_ATTEMPTS: u32 = 4;
/// TCP port used for reachability probes
pub const PROBE_PORT: u16 = 443;

// HTTP client and request budget
/// Timeout for outbound HTTP requests (throughput and geolocation)
pub const HTTP_CLIENT_TIMEOUT_SECS: u64 = 30;
/// TCP connect timeout for outbound HTTP requests
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
/// Upper bound for any single sub-probe while building one report.
/// Must stay above `HTTP_CLIENT_TIMEOUT_SECS`. A latency probe that runs past
/// it reports the fallback.
pub const REPORT_TIMEOUT: Duration = Duration::from_secs(45);

/// User-Agent sent to the throughput and geolocation endpoints
pub const USER_AGENT: &str = concat!("speed_check/", env!("CARGO_PKG_VERSION"));

// Geolocation
/// Environment variable holding the geolocation provider key
pub const GEO_API_KEY_ENV: &str = "GEO_API_KEY";
/// Default geolocation provider endpoint
pub const DEFAULT_GEO_ENDPOINT: &str = "https://api.ipgeolocation.io/ipgeo";

// Page placeholders shown when geolocation fails
/// Placeholder for the ISP name and organization
pub const GEO_ERROR_TEXT: &str = "Error";
/// Placeholder for the address and location fields
pub const GEO_MISSING_TEXT: &str = "---";

// Server
/// Default listen port when `PORT` is unset
pub const DEFAULT_PORT: u16 = 3000;
/// Default directory for static assets
pub const DEFAULT_STATIC_DIR: &str = "public";
