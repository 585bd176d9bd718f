// Background tick worker: owns the dashboard and the feed, runs one tick per interval,
// publishes each snapshot to the broadcast (stream) and watch (latest) channels.

use crate::dashboard::Dashboard;
use crate::error::DashboardError;
use crate::feed::MetricsFeed;
use crate::models::DashboardSnapshot;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::{broadcast, oneshot, watch};
use tokio::time::{Duration, Instant, interval};
use tracing::Instrument;

/// Rate limit for "no receivers" log (avoid logging every tick when no one is on /ws/dashboard)
const NO_RECEIVERS_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// Channels and shutdown for the worker.
pub struct WorkerDeps<F> {
    pub dashboard: Dashboard,
    pub feed: F,
    pub tx: broadcast::Sender<Arc<DashboardSnapshot>>,
    pub latest_tx: watch::Sender<Option<Arc<DashboardSnapshot>>>,
    pub ws_dashboard_connections: Arc<AtomicUsize>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

pub struct WorkerConfig {
    pub tick_interval_ms: u64,
    /// How often to log worker stats (real seconds).
    pub stats_log_interval_secs: u64,
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                operation = "get_timestamp",
                "system time error"
            );
            0
        })
}

/// Spawns the tick loop. The task ends (and its timers with it) when `shutdown_rx`
/// fires or its sender is dropped; the final `Dashboard` is returned from the handle.
pub fn spawn<F>(deps: WorkerDeps<F>, config: WorkerConfig) -> tokio::task::JoinHandle<Dashboard>
where
    F: MetricsFeed + 'static,
{
    let WorkerDeps {
        mut dashboard,
        mut feed,
        tx,
        latest_tx,
        ws_dashboard_connections,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        tick_interval_ms,
        stats_log_interval_secs,
    } = config;

    let stats_log_interval = Duration::from_secs(stats_log_interval_secs);

    let worker_span = tracing::span!(tracing::Level::DEBUG, "worker", tick_interval_ms);
    tokio::spawn(async move {
        let mut tick = interval(Duration::from_millis(tick_interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(stats_log_interval);
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut ticks_published: u64 = 0;
        let mut ticks_skipped: u64 = 0;
        let mut last_no_receivers_log: Option<Instant> = None;

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown_rx => {
                    tracing::debug!("Worker shutting down");
                    break;
                }
                _ = tick.tick() => {
                    let snapshot = match dashboard.tick(&mut feed, now_millis()) {
                        Ok(s) => s,
                        Err(e @ DashboardError::FeedUnavailable(_)) => {
                            ticks_skipped += 1;
                            tracing::warn!(
                                error = %e,
                                operation = "tick",
                                "tick skipped; last snapshot retained"
                            );
                            continue;
                        }
                        Err(e) => {
                            ticks_skipped += 1;
                            tracing::warn!(error = %e, operation = "tick", "tick failed");
                            continue;
                        }
                    };
                    ticks_published += 1;
                    tracing::debug!(
                        tick = snapshot.tick,
                        current = snapshot.statistics.current,
                        peak = snapshot.statistics.peak,
                        average = snapshot.statistics.average,
                        window_len = snapshot.window.len(),
                        "snapshot published"
                    );

                    latest_tx.send_replace(Some(snapshot.clone()));
                    if tx.send(snapshot).is_err() {
                        let should_log = last_no_receivers_log
                            .is_none_or(|t| t.elapsed() >= NO_RECEIVERS_LOG_INTERVAL);
                        if should_log {
                            tracing::debug!(
                                operation = "broadcast_snapshot",
                                "No active WebSocket clients; broadcast channel has no receivers"
                            );
                            last_no_receivers_log = Some(Instant::now());
                        }
                    }
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        ws_dashboard_clients =
                            ws_dashboard_connections.load(std::sync::atomic::Ordering::Relaxed),
                        ticks_published,
                        ticks_skipped,
                        peak = dashboard.statistics().peak,
                        "app stats"
                    );
                }
            }
        }
        dashboard
    }
    .instrument(worker_span))
}
