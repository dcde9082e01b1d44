//! End-to-end tests for the HTTP surface.
//!
//! The router runs over fake probe backends via `tower::ServiceExt::oneshot`,
//! so no network access is needed.

mod helpers;

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use helpers::{sample_profile, test_app, FakeGeo};

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn located() -> Arc<FakeGeo> {
    Arc::new(FakeGeo {
        profile: Some(sample_profile()),
        ..FakeGeo::default()
    })
}

#[tokio::test]
async fn test_checkspeed_returns_report() {
    let app = test_app(Some(100.0), Some(50.0), Some(10.0), located(), Path::new("public"));

    let response = app.oneshot(get("/checkspeed")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("application/json"));

    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(
        body,
        json!({
            "upspeed": 100.0,
            "downspeed": 50.0,
            "ping": {"avg": 10.0, "loss": 0.0},
            "profile": {"ip_address": "8.8.8.8", "isp_name": "Google LLC"},
            "ISP": {
                "name": "Google LLC",
                "city": "Mountain View",
                "region": "California",
                "country": "United States"
            }
        })
    );
}

#[tokio::test]
async fn test_checkspeed_partial_failure_keeps_schema() {
    let app = test_app(None, Some(50.0), None, located(), Path::new("public"));

    let response = app.oneshot(get("/checkspeed")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["upspeed"], json!(0.0));
    assert_eq!(body["downspeed"], json!(50.0));
    assert_eq!(body["ping"], json!({"avg": 0.0, "loss": 0.0}));
    assert_eq!(body["ISP"]["name"], json!("Google LLC"));
}

#[tokio::test]
async fn test_checkspeed_all_failed_is_json_error() {
    let app = test_app(None, None, None, Arc::new(FakeGeo::default()), Path::new("public"));

    let response = app.oneshot(get("/checkspeed")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["code"], json!("MEASUREMENT_UNAVAILABLE"));
    assert_eq!(
        body["failed_probes"],
        json!(["download", "upload", "latency", "geolocation"])
    );
}

#[tokio::test]
async fn test_checkspeed_geolocates_first_forwarded_hop() {
    let geo = located();
    let app = test_app(Some(1.0), Some(1.0), Some(1.0), geo.clone(), Path::new("public"));

    let request = Request::builder()
        .uri("/checkspeed")
        .header("X-Forwarded-For", "8.8.4.4, 10.0.0.1")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        *geo.asked.lock().unwrap(),
        vec![Some("8.8.4.4".to_string())]
    );
}

#[tokio::test]
async fn test_index_renders_profile() {
    let app = test_app(None, None, None, located(), Path::new("public"));

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("Google LLC"));
    assert!(html.contains("Mountain View"));
    assert!(!html.contains(" disabled>"));
}

#[tokio::test]
async fn test_index_renders_sentinels_on_failure() {
    let app = test_app(None, None, None, Arc::new(FakeGeo::default()), Path::new("public"));

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains(r#"<td id="isp-name">Error</td>"#));
    assert!(html.contains(r#"<td id="country">---</td>"#));
    assert!(html.contains(" disabled>"));
}

#[tokio::test]
async fn test_metrics_counts_failures() {
    let app = test_app(None, Some(5.0), Some(5.0), located(), Path::new("public"));

    let response = app.clone().oneshot(get("/checkspeed")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.contains("speed_check_reports_total 1"));
    assert!(text.contains(r#"speed_check_probe_failures_total{probe="download"} 1"#));
    assert!(text.contains(r#"speed_check_probe_failures_total{probe="upload"} 0"#));
}

#[tokio::test]
async fn test_static_assets_served_from_directory() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    std::fs::write(dir.path().join("app.js"), "console.log('ok');").unwrap();
    let app = test_app(None, None, None, located(), dir.path());

    let response = app.clone().oneshot(get("/app.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"console.log('ok');");

    let response = app.oneshot(get("/missing.css")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
