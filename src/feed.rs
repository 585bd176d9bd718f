// Metrics feed seam and the simulated feed used when no telemetry source is wired in

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{FeedConfig, ServiceConfig};
use crate::error::{DashboardError, Result};

/// One unvalidated `(timestamp, value)` pair as delivered by a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawReading {
    /// When the reading was observed, ms since the epoch.
    pub timestamp: u64,
    pub value: i64,
}

/// Source of RPS readings and health probes, polled once per tick.
///
/// Readings are raw: the dashboard validates them, so a feed may hand back
/// anything it received from upstream. A reading that cannot be parsed at all
/// is reported as `Err(InvalidSample)`; `Err(FeedUnavailable)` means nothing
/// arrived.
pub trait MetricsFeed: Send {
    /// One raw RPS reading for the tick at `now_ms`.
    fn sample(&mut self, now_ms: u64) -> Result<RawReading>;

    /// `Ok(true)` when healthy, `Ok(false)` on an active failure,
    /// `Err(ProbeTimeout)` when the probe got no answer.
    fn probe(&mut self, service: &ServiceConfig) -> Result<bool>;
}

impl<F: MetricsFeed + ?Sized> MetricsFeed for Box<F> {
    fn sample(&mut self, now_ms: u64) -> Result<RawReading> {
        (**self).sample(now_ms)
    }

    fn probe(&mut self, service: &ServiceConfig) -> Result<bool> {
        (**self).probe(service)
    }
}

/// Slow sine wave around a base rate with uniform noise; probes fail with the
/// per-service probabilities from config.
pub struct SimulatedFeed {
    config: FeedConfig,
    rng: StdRng,
}

impl SimulatedFeed {
    pub fn new(config: FeedConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Noise-free signal value at `now_ms`.
    pub fn baseline(&self, now_ms: u64) -> f64 {
        let phase = now_ms as f64 / self.config.period_ms;
        self.config.base_rps + phase.sin() * self.config.variation
    }
}

impl MetricsFeed for SimulatedFeed {
    fn sample(&mut self, now_ms: u64) -> Result<RawReading> {
        let noise = (self.rng.r#gen::<f64>() - 0.5) * self.config.noise;
        let rps = (self.baseline(now_ms) + noise).floor();
        // Rates below zero are not plausible; clamp here rather than in the aggregator.
        Ok(RawReading {
            timestamp: now_ms,
            value: rps.max(0.0) as i64,
        })
    }

    fn probe(&mut self, service: &ServiceConfig) -> Result<bool> {
        let roll: f64 = self.rng.r#gen();
        if roll < service.no_signal_probability {
            return Err(DashboardError::ProbeTimeout {
                service: service.id.clone(),
            });
        }
        Ok(roll >= service.no_signal_probability + service.failure_probability)
    }
}
