//! Server state and request helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request};

use crate::geoip::MeasurementRequest;
use crate::report::ReportBuilder;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<ReportBuilder>,
}

impl AppState {
    pub fn new(reports: ReportBuilder) -> Self {
        Self {
            reports: Arc::new(reports),
        }
    }
}

/// Reads the client address metadata of `request`.
///
/// The peer address is only present when the server runs with connect info.
pub(crate) fn measurement_request(request: &Request) -> MeasurementRequest {
    MeasurementRequest {
        forwarded_for: request
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        remote_addr: request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip()),
    }
}
