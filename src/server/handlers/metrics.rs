//! Prometheus metrics handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use strum::IntoEnumIterator;

use super::super::types::AppState;
use crate::error_handling::ProbeKind;

/// Prometheus-compatible metrics endpoint
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    let stats = state.reports.stats();

    let mut metrics = format!(
        r#"# HELP speed_check_reports_total Number of diagnostics reports assembled
# TYPE speed_check_reports_total counter
speed_check_reports_total {}

# HELP speed_check_probe_failures_total Number of probes that fell back to placeholders
# TYPE speed_check_probe_failures_total counter
"#,
        stats.reports()
    );
    for kind in ProbeKind::iter() {
        metrics.push_str(&format!(
            "speed_check_probe_failures_total{{probe=\"{}\"}} {}\n",
            kind,
            stats.failure_count(kind)
        ));
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4")],
        metrics,
    )
        .into_response()
}
