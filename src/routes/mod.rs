// HTTP + WebSocket routes for renderers

mod http;
mod ws;

use axum::{Router, routing::get};
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::{broadcast, watch};
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::models::DashboardSnapshot;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) snapshot_tx: broadcast::Sender<Arc<DashboardSnapshot>>,
    pub(crate) latest_rx: watch::Receiver<Option<Arc<DashboardSnapshot>>>,
    pub(crate) ws_dashboard_connections: Arc<AtomicUsize>,
    pub(crate) config: AppConfig,
}

pub fn app(
    snapshot_tx: broadcast::Sender<Arc<DashboardSnapshot>>,
    latest_rx: watch::Receiver<Option<Arc<DashboardSnapshot>>>,
    ws_dashboard_connections: Arc<AtomicUsize>,
    config: AppConfig,
) -> Router {
    let state = AppState {
        snapshot_tx,
        latest_rx,
        ws_dashboard_connections,
        config,
    };
    Router::new()
        .route("/", get(|| async { "RPS monitor" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/snapshot", get(http::snapshot_handler)) // GET /api/snapshot
        .route("/api/services", get(http::services_handler)) // GET /api/services
        .route("/ws/dashboard", get(ws::ws_dashboard)) // WS /ws/dashboard
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
