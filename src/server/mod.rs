//! HTTP server.
//!
//! Provides:
//! - `/` - HTML page with the client's geolocation
//! - `/checkspeed` - JSON diagnostics report
//! - `/metrics` - Prometheus-compatible counters
//!
//! Any other path is served from the static asset directory.

mod error;
mod handlers;
mod page;
mod types;

use std::net::SocketAddr;
use std::path::Path;

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

use handlers::{checkspeed_handler, index_handler, metrics_handler};
pub use error::ApiError;
pub use types::AppState;

/// Builds the application router.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/checkspeed", get(checkspeed_handler))
        .route("/metrics", get(metrics_handler))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Binds `addr` and serves `app` until Ctrl-C.
pub async fn start_server(addr: SocketAddr, app: Router) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}: {}", addr, e))?;

    log::info!("Listening on http://{}/", addr);
    log::info!("  - Page: http://{}/", addr);
    log::info!("  - Report: http://{}/checkspeed", addr);
    log::info!("  - Metrics: http://{}/metrics", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
