//! HTTP-based bandwidth meter.

use std::time::Instant;

use async_trait::async_trait;
use rand::Rng;
use reqwest::header::CONTENT_TYPE;

use super::{BandwidthMeter, ThroughputResult, UploadEndpoint};
use crate::error_handling::ProbeError;

/// Times real HTTP transfers with a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpBandwidthMeter {
    client: reqwest::Client,
}

impl HttpBandwidthMeter {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn random_payload(size: usize) -> Vec<u8> {
    let mut payload = vec![0u8; size];
    rand::rng().fill(&mut payload[..]);
    payload
}

#[async_trait]
impl BandwidthMeter for HttpBandwidthMeter {
    async fn check_download_speed(
        &self,
        url: &str,
        expected_bytes: usize,
    ) -> Result<ThroughputResult, ProbeError> {
        let start = Instant::now();
        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status(status.as_u16()));
        }

        let mut received = 0usize;
        while let Some(chunk) = response.chunk().await? {
            received += chunk.len();
        }
        let elapsed = start.elapsed();

        if received != expected_bytes {
            log::debug!(
                "Download from {} returned {} bytes, expected {}",
                url,
                received,
                expected_bytes
            );
        }
        Ok(ThroughputResult::from_transfer(received, elapsed))
    }

    async fn check_upload_speed(
        &self,
        endpoint: &UploadEndpoint,
        expected_bytes: usize,
    ) -> Result<ThroughputResult, ProbeError> {
        let payload = random_payload(expected_bytes);
        let url = endpoint.url();

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, endpoint.content_type.as_str())
            .body(payload)
            .send()
            .await?;
        let elapsed = start.elapsed();

        // The catcher endpoint is not expected to accept the payload; any
        // response means the body was transferred.
        log::debug!("Upload to {} answered {}", url, response.status());
        Ok(ThroughputResult::from_transfer(expected_bytes, elapsed))
    }
}
