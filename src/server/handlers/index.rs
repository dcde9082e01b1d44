//! Index page handler.

use axum::extract::{Request, State};
use axum::response::Html;

use super::super::page::{render_index, IndexView};
use super::super::types::{measurement_request, AppState};

/// Renders the page with the client's geolocation, or the error placeholders.
pub async fn index_handler(State(state): State<AppState>, request: Request) -> Html<String> {
    let measurement = measurement_request(&request);
    let view = match state.reports.locate(&measurement).await {
        Ok(geo) => IndexView::located(geo),
        Err(_) => IndexView::failed(),
    };
    Html(render_index(&view))
}
