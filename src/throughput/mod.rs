//! Download and upload throughput measurement.

mod http;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::{UPLOAD_HOST, UPLOAD_PATH, UPLOAD_PORT};
use crate::error_handling::ProbeError;

pub use http::HttpBandwidthMeter;

/// Measured transfer rate in one direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ThroughputResult {
    pub megabits_per_second: f64,
}

impl ThroughputResult {
    /// Rate for `bytes` transferred in `elapsed`, rounded to two decimals.
    pub fn from_transfer(bytes: usize, elapsed: Duration) -> Self {
        // A zero duration would divide to infinity
        let secs = elapsed.as_secs_f64().max(1e-6);
        let mbps = (bytes as f64 * 8.0) / secs / 1_000_000.0;
        Self {
            megabits_per_second: (mbps * 100.0).round() / 100.0,
        }
    }
}

/// Target of the upload measurement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEndpoint {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub content_type: String,
}

impl UploadEndpoint {
    pub fn url(&self) -> String {
        let scheme = if self.port == 443 { "https" } else { "http" };
        format!("{}://{}:{}{}", scheme, self.host, self.port, self.path)
    }
}

impl Default for UploadEndpoint {
    fn default() -> Self {
        Self {
            host: UPLOAD_HOST.to_string(),
            port: UPLOAD_PORT,
            path: UPLOAD_PATH.to_string(),
            content_type: "application/json".to_string(),
        }
    }
}

/// Bandwidth measurement backend.
#[async_trait]
pub trait BandwidthMeter: Send + Sync {
    /// Downloads `url`, which is expected to serve `expected_bytes`.
    async fn check_download_speed(
        &self,
        url: &str,
        expected_bytes: usize,
    ) -> Result<ThroughputResult, ProbeError>;

    /// Posts `expected_bytes` of payload to `endpoint`.
    async fn check_upload_speed(
        &self,
        endpoint: &UploadEndpoint,
        expected_bytes: usize,
    ) -> Result<ThroughputResult, ProbeError>;
}

/// Measures download throughput, logging any failure.
pub async fn probe_download(
    meter: &dyn BandwidthMeter,
    url: &str,
    expected_bytes: usize,
) -> Result<ThroughputResult, ProbeError> {
    let result = meter.check_download_speed(url, expected_bytes).await;
    match &result {
        Ok(speed) => log::debug!("Download from {}: {} Mbps", url, speed.megabits_per_second),
        Err(e) => log::warn!("Download speed check against {} failed: {}", url, e),
    }
    result
}

/// Measures upload throughput, logging any failure.
pub async fn probe_upload(
    meter: &dyn BandwidthMeter,
    endpoint: &UploadEndpoint,
    expected_bytes: usize,
) -> Result<ThroughputResult, ProbeError> {
    let result = meter.check_upload_speed(endpoint, expected_bytes).await;
    match &result {
        Ok(speed) => log::debug!(
            "Upload to {}: {} Mbps",
            endpoint.url(),
            speed.megabits_per_second
        ),
        Err(e) => log::warn!("Upload speed check against {} failed: {}", endpoint.url(), e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transfer() {
        // 500 000 bytes in one second = 4 Mbit/s
        let result = ThroughputResult::from_transfer(500_000, Duration::from_secs(1));
        assert_eq!(result.megabits_per_second, 4.0);

        let result = ThroughputResult::from_transfer(200_000, Duration::from_millis(300));
        assert_eq!(result.megabits_per_second, 5.33);
    }

    #[test]
    fn test_from_transfer_zero_elapsed_is_finite() {
        let result = ThroughputResult::from_transfer(1_000, Duration::ZERO);
        assert!(result.megabits_per_second.is_finite());
    }

    #[test]
    fn test_upload_endpoint_url() {
        assert_eq!(
            UploadEndpoint::default().url(),
            "http://www.facebook.com:80/catchers/544b09b4599c1d0200000289"
        );

        let tls = UploadEndpoint {
            port: 443,
            ..UploadEndpoint::default()
        };
        assert!(tls.url().starts_with("https://"));
    }
}
