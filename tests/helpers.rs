// Shared test fakes for the probe backends.
//
// Each fake answers from fixed values so endpoint tests never touch the network.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use speed_check::geoip::{GeoLookup, GeoProfile};
use speed_check::latency::{ProbeReply, ReachabilityProbe};
use speed_check::report::{Probes, ReportBuilder};
use speed_check::server::{router, AppState};
use speed_check::throughput::{BandwidthMeter, ThroughputResult, UploadEndpoint};
use speed_check::ProbeError;

pub struct FakeBandwidth {
    pub download: Option<f64>,
    pub upload: Option<f64>,
}

#[async_trait]
impl BandwidthMeter for FakeBandwidth {
    async fn check_download_speed(
        &self,
        _url: &str,
        _expected_bytes: usize,
    ) -> Result<ThroughputResult, ProbeError> {
        self.download
            .map(|megabits_per_second| ThroughputResult { megabits_per_second })
            .ok_or(ProbeError::Status(503))
    }

    async fn check_upload_speed(
        &self,
        _endpoint: &UploadEndpoint,
        _expected_bytes: usize,
    ) -> Result<ThroughputResult, ProbeError> {
        self.upload
            .map(|megabits_per_second| ThroughputResult { megabits_per_second })
            .ok_or(ProbeError::Status(503))
    }
}

pub struct FakeReachability {
    pub time_ms: Option<f64>,
}

#[async_trait]
impl ReachabilityProbe for FakeReachability {
    async fn probe(&self, host: &str, _timeout: Duration) -> Result<ProbeReply, ProbeError> {
        match self.time_ms {
            Some(time_ms) => Ok(ProbeReply {
                time_ms,
                packet_loss: "0".to_string(),
            }),
            None => Err(ProbeError::Unreachable {
                host: host.to_string(),
                reason: "fake outage".to_string(),
            }),
        }
    }
}

/// Answers with a fixed profile and records the addresses it was asked about.
#[derive(Default)]
pub struct FakeGeo {
    pub profile: Option<GeoProfile>,
    pub asked: Mutex<Vec<Option<String>>>,
}

#[async_trait]
impl GeoLookup for FakeGeo {
    async fn lookup(&self, ip: Option<&str>) -> Result<GeoProfile, ProbeError> {
        self.asked.lock().unwrap().push(ip.map(str::to_string));
        self.profile.clone().ok_or(ProbeError::MissingApiKey)
    }
}

pub fn sample_profile() -> GeoProfile {
    GeoProfile {
        ip: "8.8.8.8".to_string(),
        isp: "Google LLC".to_string(),
        organization: "GOOGLE".to_string(),
        city: "Mountain View".to_string(),
        region: "California".to_string(),
        country: "United States".to_string(),
    }
}

/// Builds the router over fakes; `None` makes the corresponding probe fail.
#[allow(dead_code)] // Not every test file uses every helper
pub fn test_app(
    download: Option<f64>,
    upload: Option<f64>,
    rtt: Option<f64>,
    geo: Arc<FakeGeo>,
    static_dir: &std::path::Path,
) -> axum::Router {
    let probes = Probes {
        bandwidth: Arc::new(FakeBandwidth { download, upload }),
        reachability: Arc::new(FakeReachability { time_ms: rtt }),
        geo,
    };
    router(AppState::new(ReportBuilder::new(probes)), static_dir)
}
