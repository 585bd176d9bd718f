// Per-tick published view

use serde::{Deserialize, Serialize};

use super::{HealthState, Sample, ServiceHealth, Statistics};

/// Everything a renderer needs for one tick. Built fresh every tick and shared
/// behind an `Arc`, so a published snapshot never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Tick counter within the current session (1 for the first published tick).
    pub tick: u64,
    /// Wall-clock time of the tick, ms since the epoch.
    pub timestamp: u64,
    /// Window contents, oldest first.
    pub window: Vec<Sample>,
    pub statistics: Statistics,
    /// Services in configured order.
    pub services: Vec<ServiceHealth>,
}

impl DashboardSnapshot {
    pub fn health_of(&self, id: &str) -> Option<HealthState> {
        self.services.iter().find(|s| s.id == id).map(|s| s.state)
    }

    pub fn values(&self) -> Vec<u64> {
        self.window.iter().map(Sample::value).collect()
    }
}
