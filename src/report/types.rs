//! Report data structures.
//!
//! Field names follow the JSON consumed by the page script.

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::error_handling::ProbeKind;
use crate::geoip::GeoProfile;
use crate::latency::LatencyResult;

/// JSON body of `GET /checkspeed`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticsReport {
    /// Download measurement in Mbps (the page labels this field as upload)
    pub upspeed: f64,
    /// Upload measurement in Mbps
    pub downspeed: f64,
    pub ping: LatencyResult,
    pub profile: ClientProfile,
    #[serde(rename = "ISP")]
    pub isp: IspDetails,
    /// Probes that fell back to placeholders
    #[serde(skip)]
    pub failed: Vec<ProbeKind>,
}

impl DiagnosticsReport {
    /// True when no measurement at all succeeded.
    pub fn all_failed(&self) -> bool {
        ProbeKind::iter().all(|kind| self.failed.contains(&kind))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientProfile {
    pub ip_address: String,
    pub isp_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IspDetails {
    pub name: String,
    pub city: String,
    pub region: String,
    pub country: String,
}

impl From<&GeoProfile> for ClientProfile {
    fn from(geo: &GeoProfile) -> Self {
        Self {
            ip_address: geo.ip.clone(),
            isp_name: geo.isp.clone(),
        }
    }
}

impl From<GeoProfile> for IspDetails {
    fn from(geo: GeoProfile) -> Self {
        Self {
            name: geo.isp,
            city: geo.city,
            region: geo.region,
            country: geo.country,
        }
    }
}
