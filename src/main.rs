use anyhow::Result;
use rps_monitor::*;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::{broadcast, watch};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        window_capacity = app_config.dashboard.window_capacity,
        tick_interval_ms = app_config.dashboard.tick_interval_ms,
        services = app_config.services.len(),
        "config loaded"
    );

    let (tx, _) = broadcast::channel(app_config.dashboard.broadcast_capacity);
    let (latest_tx, latest_rx) = watch::channel(None);
    let ws_dashboard_connections = Arc::new(AtomicUsize::new(0));
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let worker_handle = worker::spawn(
        worker::WorkerDeps {
            dashboard: dashboard::Dashboard::from_config(&app_config),
            feed: feed::SimulatedFeed::new(app_config.feed.clone()),
            tx: tx.clone(),
            latest_tx,
            ws_dashboard_connections: ws_dashboard_connections.clone(),
            shutdown_rx,
        },
        worker::WorkerConfig {
            tick_interval_ms: app_config.dashboard.tick_interval_ms,
            stats_log_interval_secs: app_config.dashboard.stats_log_interval_secs,
        },
    );

    let app = routes::app(
        tx,
        latest_rx,
        ws_dashboard_connections,
        app_config.clone(),
    );
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
        }
    }

    let _ = shutdown_tx.send(());
    let dashboard = worker_handle.await?;
    tracing::info!(
        ticks = dashboard.ticks(),
        peak = dashboard.statistics().peak,
        "worker stopped"
    );

    Ok(())
}
