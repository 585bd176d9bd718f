// GET handlers: version, latest snapshot, monitored services

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use super::AppState;

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// GET /version — service name and version from Cargo.toml.
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/snapshot — latest published snapshot; 503 until the first tick lands.
pub(super) async fn snapshot_handler(State(state): State<AppState>) -> axum::response::Response {
    let latest = state.latest_rx.borrow().clone();
    match latest {
        Some(snapshot) => axum::Json(snapshot.as_ref().clone()).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "no snapshot published yet").into_response(),
    }
}

/// GET /api/services — monitored services with their configured probe probabilities.
pub(super) async fn services_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.config.services.clone())
}
