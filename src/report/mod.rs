//! Diagnostics report assembly.
//!
//! Runs the four independent probes concurrently, bounds each by the report
//! timeout, and replaces every failure with its placeholder so the result is
//! always complete.

mod types;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{
    DOWNLOAD_SIZE_BYTES, DOWNLOAD_URL, LATENCY_HOSTS, PROBE_TIMEOUT_SECS, REPORT_TIMEOUT,
    UPLOAD_SIZE_BYTES,
};
use crate::error_handling::{ProbeError, ProbeKind, ProbeStats};
use crate::geoip::{resolve_geo, GeoLookup, GeoProfile, MeasurementRequest};
use crate::latency::{probe_latency, ReachabilityProbe};
use crate::throughput::{probe_download, probe_upload, BandwidthMeter, UploadEndpoint};

pub use types::{ClientProfile, DiagnosticsReport, IspDetails};

/// Measurement backends, constructed once at start-up.
#[derive(Clone)]
pub struct Probes {
    pub bandwidth: Arc<dyn BandwidthMeter>,
    pub reachability: Arc<dyn ReachabilityProbe>,
    pub geo: Arc<dyn GeoLookup>,
}

/// Fixed measurement targets.
#[derive(Debug, Clone)]
pub struct MeasurementTargets {
    pub download_url: String,
    pub download_bytes: usize,
    pub upload_endpoint: UploadEndpoint,
    pub upload_bytes: usize,
    pub latency_hosts: Vec<String>,
    pub probe_timeout: Duration,
}

impl Default for MeasurementTargets {
    fn default() -> Self {
        Self {
            download_url: DOWNLOAD_URL.to_string(),
            download_bytes: DOWNLOAD_SIZE_BYTES,
            upload_endpoint: UploadEndpoint::default(),
            upload_bytes: UPLOAD_SIZE_BYTES,
            latency_hosts: LATENCY_HOSTS.iter().map(|h| h.to_string()).collect(),
            probe_timeout: Duration::from_secs(PROBE_TIMEOUT_SECS),
        }
    }
}

/// Builds diagnostics reports. Shared by all request handlers.
pub struct ReportBuilder {
    probes: Probes,
    targets: MeasurementTargets,
    timeout: Duration,
    stats: Arc<ProbeStats>,
}

impl ReportBuilder {
    pub fn new(probes: Probes) -> Self {
        Self {
            probes,
            targets: MeasurementTargets::default(),
            timeout: REPORT_TIMEOUT,
            stats: Arc::new(ProbeStats::new()),
        }
    }

    pub fn with_targets(mut self, targets: MeasurementTargets) -> Self {
        self.targets = targets;
        self
    }

    /// Overrides the per-probe time budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn stats(&self) -> &Arc<ProbeStats> {
        &self.stats
    }

    /// Runs `probe` within the report timeout, counting any failure.
    async fn bounded<T>(
        &self,
        kind: ProbeKind,
        probe: impl Future<Output = Result<T, ProbeError>>,
    ) -> Result<T, ProbeError> {
        let result = match tokio::time::timeout(self.timeout, probe).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!("{} probe exceeded {}s budget", kind, self.timeout.as_secs());
                Err(ProbeError::Timeout {
                    what: format!("{kind} probe"),
                    after: self.timeout,
                })
            }
        };
        if result.is_err() {
            self.stats.increment_failure(kind);
        }
        result
    }

    /// Geolocates the client behind `request`.
    pub async fn locate(&self, request: &MeasurementRequest) -> Result<GeoProfile, ProbeError> {
        self.bounded(
            ProbeKind::Geolocation,
            resolve_geo(self.probes.geo.as_ref(), request),
        )
        .await
    }

    /// Measures throughput, latency and geolocation for one client.
    ///
    /// Never fails: unavailable measurements are reported as `0` and the
    /// geolocation fields as the error placeholders. `failed` lists which
    /// probes fell back.
    pub async fn build_report(&self, request: &MeasurementRequest) -> DiagnosticsReport {
        let targets = &self.targets;
        let (download, upload, latency, geo) = tokio::join!(
            self.bounded(
                ProbeKind::Download,
                probe_download(
                    self.probes.bandwidth.as_ref(),
                    &targets.download_url,
                    targets.download_bytes,
                ),
            ),
            self.bounded(
                ProbeKind::Upload,
                probe_upload(
                    self.probes.bandwidth.as_ref(),
                    &targets.upload_endpoint,
                    targets.upload_bytes,
                ),
            ),
            self.bounded(
                ProbeKind::Latency,
                probe_latency(
                    self.probes.reachability.as_ref(),
                    targets.latency_hosts.as_slice(),
                    targets.probe_timeout,
                ),
            ),
            self.locate(request),
        );

        let mut failed = Vec::new();
        let mut settle = |kind: ProbeKind, ok: bool| {
            if !ok {
                failed.push(kind);
            }
        };
        settle(ProbeKind::Download, download.is_ok());
        settle(ProbeKind::Upload, upload.is_ok());
        settle(ProbeKind::Latency, latency.is_ok());
        settle(ProbeKind::Geolocation, geo.is_ok());

        let geo = geo.unwrap_or_else(|_| GeoProfile::error_placeholder());
        self.stats.increment_reports();

        DiagnosticsReport {
            upspeed: download.unwrap_or_default().megabits_per_second,
            downspeed: upload.unwrap_or_default().megabits_per_second,
            ping: latency.unwrap_or_default(),
            profile: ClientProfile::from(&geo),
            isp: IspDetails::from(geo),
            failed,
        }
    }
}
