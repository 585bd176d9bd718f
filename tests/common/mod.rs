// Shared test helpers

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use rps_monitor::config::ServiceConfig;
use rps_monitor::error::{DashboardError, Result};
use rps_monitor::feed::{MetricsFeed, RawReading};
use rps_monitor::models::Sample;

/// Feed that replays queued readings; an empty queue means the feed is down.
/// Readings without an explicit timestamp are stamped with the tick time.
/// Probes for services without a script are healthy.
#[derive(Default)]
pub struct ScriptedFeed {
    samples: VecDeque<Result<(Option<u64>, i64)>>,
    probes: HashMap<String, VecDeque<Result<bool>>>,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: impl IntoIterator<Item = i64>) -> Self {
        let mut feed = Self::new();
        for v in values {
            feed.push_value(v);
        }
        feed
    }

    pub fn push_value(&mut self, value: i64) -> &mut Self {
        self.samples.push_back(Ok((None, value)));
        self
    }

    pub fn push_reading(&mut self, timestamp: u64, value: i64) -> &mut Self {
        self.samples.push_back(Ok((Some(timestamp), value)));
        self
    }

    /// A reading the feed itself could not make sense of.
    pub fn push_garbled(&mut self, value: i64) -> &mut Self {
        self.samples
            .push_back(Err(DashboardError::InvalidSample { value }));
        self
    }

    pub fn push_outage(&mut self) -> &mut Self {
        self.samples
            .push_back(Err(DashboardError::FeedUnavailable("scripted outage".into())));
        self
    }

    pub fn push_probe(&mut self, service: &str, healthy: bool) -> &mut Self {
        self.probes
            .entry(service.to_string())
            .or_default()
            .push_back(Ok(healthy));
        self
    }

    pub fn push_probe_timeout(&mut self, service: &str) -> &mut Self {
        self.probes
            .entry(service.to_string())
            .or_default()
            .push_back(Err(DashboardError::ProbeTimeout {
                service: service.to_string(),
            }));
        self
    }
}

impl MetricsFeed for ScriptedFeed {
    fn sample(&mut self, now_ms: u64) -> Result<RawReading> {
        let (timestamp, value) = self
            .samples
            .pop_front()
            .unwrap_or_else(|| Err(DashboardError::FeedUnavailable("script exhausted".into())))?;
        Ok(RawReading {
            timestamp: timestamp.unwrap_or(now_ms),
            value,
        })
    }

    fn probe(&mut self, service: &ServiceConfig) -> Result<bool> {
        self.probes
            .get_mut(&service.id)
            .and_then(|q| q.pop_front())
            .unwrap_or(Ok(true))
    }
}

pub fn services() -> Vec<ServiceConfig> {
    vec![
        ServiceConfig::new("ingress-proxy", 0.05),
        ServiceConfig::new("data-store", 0.03),
    ]
}

pub fn sample(timestamp: u64, value: u64) -> Sample {
    Sample::new(timestamp, value as i64).unwrap()
}
