//! JSON diagnostics handler.

use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::super::error::ApiError;
use super::super::types::{measurement_request, AppState};

/// Measures and returns the full diagnostics report.
///
/// Responds `503` with a JSON error body when no measurement succeeded.
pub async fn checkspeed_handler(State(state): State<AppState>, request: Request) -> Response {
    let measurement = measurement_request(&request);
    let report = state.reports.build_report(&measurement).await;

    if report.all_failed() {
        log::error!("Every probe failed; returning 503");
        return ApiError::MeasurementUnavailable {
            failed: report.failed,
        }
        .into_response();
    }
    if !report.failed.is_empty() {
        log::info!("Report served with placeholders for {:?}", report.failed);
    }

    Json(report).into_response()
}
