// Dashboard controller: owns all running state and advances it one tick at a time.

use std::sync::Arc;

use crate::aggregator::aggregate;
use crate::config::{AppConfig, ServiceConfig};
use crate::error::{DashboardError, Result};
use crate::feed::{MetricsFeed, RawReading};
use crate::health::HealthTracker;
use crate::models::{DashboardSnapshot, HealthState, ProbeOutcome, Sample, Statistics};
use crate::window::SlidingWindow;

/// Single owned aggregate of window, statistics and health state.
///
/// All mutation goes through [`Dashboard::tick`] and [`Dashboard::reset`];
/// readers only ever see the immutable snapshots it hands out.
pub struct Dashboard {
    window: SlidingWindow,
    statistics: Statistics,
    health: HealthTracker,
    services: Vec<ServiceConfig>,
    ticks: u64,
    latest: Option<Arc<DashboardSnapshot>>,
}

impl Dashboard {
    pub fn new(window_capacity: usize, services: Vec<ServiceConfig>) -> Self {
        Self {
            window: SlidingWindow::new(window_capacity),
            statistics: Statistics::default(),
            health: HealthTracker::new(&services),
            services,
            ticks: 0,
            latest: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.dashboard.window_capacity, config.services.clone())
    }

    /// Runs one sampling cycle and returns the freshly published snapshot.
    ///
    /// `FeedUnavailable` skips the whole tick: nothing changes and the previous
    /// snapshot stays the latest. An invalid reading, whether reported by the
    /// feed or rejected here, only skips the RPS series; health probes still
    /// run and a snapshot is still published.
    pub fn tick<F>(&mut self, feed: &mut F, now_ms: u64) -> Result<Arc<DashboardSnapshot>>
    where
        F: MetricsFeed + ?Sized,
    {
        let reading = match feed.sample(now_ms) {
            Err(e @ DashboardError::FeedUnavailable(_)) => return Err(e),
            other => other,
        };

        match reading.and_then(|r| self.validate(r)) {
            Ok(sample) => {
                self.window.push(sample);
                self.statistics =
                    aggregate(self.window.values(), sample.value(), self.statistics.peak);
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    operation = "validate_sample",
                    "sample rejected; RPS series skipped this tick"
                );
            }
        }

        for service in &self.services {
            let outcome = match feed.probe(service) {
                Ok(healthy) => ProbeOutcome::from_healthy(healthy),
                Err(DashboardError::ProbeTimeout { .. }) => ProbeOutcome::NoSignal,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        service = %service.id,
                        operation = "probe",
                        "probe failed without a timeout; treating as no signal"
                    );
                    ProbeOutcome::NoSignal
                }
            };
            self.health.apply(&service.id, outcome);
        }

        self.ticks += 1;
        let snapshot = Arc::new(DashboardSnapshot {
            tick: self.ticks,
            timestamp: now_ms,
            window: self.window.to_vec(),
            statistics: self.statistics,
            services: self.health.to_vec(),
        });
        self.latest = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Rejects negative rates and readings observed before the newest sample
    /// already in the window.
    fn validate(&self, reading: RawReading) -> Result<Sample> {
        let sample = Sample::new(reading.timestamp, reading.value)?;
        if let Some(latest) = self.window.latest()
            && sample.timestamp() < latest.timestamp()
        {
            return Err(DashboardError::InvalidSample {
                value: reading.value,
            });
        }
        Ok(sample)
    }

    /// Starts a new session: empties the window and forgets the peak.
    pub fn reset(&mut self) {
        self.window.clear();
        self.statistics = Statistics::default();
        self.health.reset();
        self.ticks = 0;
        self.latest = None;
    }

    pub fn latest(&self) -> Option<Arc<DashboardSnapshot>> {
        self.latest.clone()
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    pub fn health(&self, service: &str) -> Option<HealthState> {
        self.health.state(service)
    }

    pub fn services(&self) -> &[ServiceConfig] {
        &self.services
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
