//! Geolocation data structures.

use std::net::IpAddr;

use serde::Serialize;

/// Address metadata of one inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementRequest {
    /// Raw `X-Forwarded-For` value: comma-separated hops, original client first
    pub forwarded_for: Option<String>,
    /// Peer address of the TCP connection
    pub remote_addr: Option<IpAddr>,
}

/// Provider-independent view of a geolocation answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeoProfile {
    pub ip: String,
    pub isp: String,
    pub organization: String,
    pub city: String,
    pub region: String,
    pub country: String,
}

impl GeoProfile {
    /// Profile shown when geolocation failed.
    pub fn error_placeholder() -> Self {
        use crate::config::{GEO_ERROR_TEXT, GEO_MISSING_TEXT};
        Self {
            ip: GEO_MISSING_TEXT.to_string(),
            isp: GEO_ERROR_TEXT.to_string(),
            organization: GEO_ERROR_TEXT.to_string(),
            city: GEO_MISSING_TEXT.to_string(),
            region: GEO_MISSING_TEXT.to_string(),
            country: GEO_MISSING_TEXT.to_string(),
        }
    }
}
