// WebSocket handler and snapshot stream

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use bytes::Bytes;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::broadcast;
use tokio::time::{Duration, timeout};

use super::AppState;
use crate::models::DashboardSnapshot;

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Decrements ws_dashboard connection count on drop (connect = +1, drop = -1).
struct WsDashboardGuard(Arc<AtomicUsize>);

impl Drop for WsDashboardGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, std::sync::atomic::Ordering::Relaxed);
    }
}

pub(super) async fn ws_dashboard(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let tx = state.snapshot_tx.clone();
    let conn_count = state.ws_dashboard_connections.clone();
    let latest_rx = state.latest_rx.clone();
    ws.on_upgrade(move |socket| async move {
        // Subscribe before reading the latest value so no tick falls between the two.
        let mut rx = tx.subscribe();
        let latest = latest_rx.borrow().clone();
        if let Err(e) = stream_dashboard(socket, &mut rx, latest, conn_count).await {
            tracing::info!("Dashboard stream error: {}", e);
        }
    })
}

/// Sends one snapshot as a JSON text frame. Returns false when the client is gone or too slow.
async fn send_snapshot(
    socket: &mut WebSocket,
    snapshot: &DashboardSnapshot,
) -> anyhow::Result<bool> {
    let json = serde_json::to_string(snapshot)?;
    let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Text(json.into()))).await;
    Ok(matches!(r, Ok(Ok(()))))
}

async fn stream_dashboard(
    mut socket: WebSocket,
    rx: &mut broadcast::Receiver<Arc<DashboardSnapshot>>,
    latest: Option<Arc<DashboardSnapshot>>,
    conn_count: Arc<AtomicUsize>,
) -> anyhow::Result<()> {
    conn_count.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    let _guard = WsDashboardGuard(conn_count);
    tracing::info!("Client connected to dashboard stream");

    let mut last_sent_tick = None;
    if let Some(snapshot) = latest {
        if !send_snapshot(&mut socket, &snapshot).await? {
            return Ok(());
        }
        last_sent_tick = Some(snapshot.tick);
    }

    let mut ping_interval = tokio::time::interval(WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(snapshot) => {
                        // The welcome snapshot may also be queued on the channel.
                        if last_sent_tick == Some(snapshot.tick) {
                            continue;
                        }
                        if !send_snapshot(&mut socket, &snapshot).await? {
                            break;
                        }
                        last_sent_tick = Some(snapshot.tick);
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("WebSocket /ws/dashboard client lagged, skipped {} messages", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Ping(Bytes::new()))).await;
                if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                    break;
                }
            }
        }
    }
    Ok(())
}
