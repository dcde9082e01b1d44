//! JSON error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error_handling::ProbeKind;

/// Errors returned by the JSON endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Every measurement failed; there is nothing meaningful to report.
    #[error("No measurement could be completed")]
    MeasurementUnavailable { failed: Vec<ProbeKind> },
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::MeasurementUnavailable { .. } => "MEASUREMENT_UNAVAILABLE",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MeasurementUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let failed: Vec<&str> = match &self {
            ApiError::MeasurementUnavailable { failed } => {
                failed.iter().map(|kind| kind.as_str()).collect()
            }
        };
        let body = json!({
            "error": self.to_string(),
            "code": self.error_code(),
            "failed_probes": failed,
        });
        (self.status_code(), Json(body)).into_response()
    }
}
