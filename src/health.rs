// Per-service connectivity tracker. Each outcome replaces the previous state; no history, no hysteresis.

use crate::config::ServiceConfig;
use crate::models::{HealthState, ProbeOutcome, ServiceHealth};

#[derive(Debug, Clone)]
struct Entry {
    id: String,
    name: String,
    state: HealthState,
}

/// Ordered set of monitored services and their current state.
#[derive(Debug, Clone, Default)]
pub struct HealthTracker {
    entries: Vec<Entry>,
}

impl HealthTracker {
    /// Every service starts out `Connected`.
    pub fn new<'a>(services: impl IntoIterator<Item = &'a ServiceConfig>) -> Self {
        let entries = services
            .into_iter()
            .map(|s| Entry {
                id: s.id.clone(),
                name: s.display_name().to_string(),
                state: HealthState::Connected,
            })
            .collect();
        Self { entries }
    }

    /// Applies one probe outcome and returns the resulting state, or `None`
    /// if the service is not monitored.
    pub fn apply(&mut self, service: &str, outcome: ProbeOutcome) -> Option<HealthState> {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == service) else {
            tracing::warn!(service, "probe outcome for unmonitored service ignored");
            return None;
        };
        let next = HealthState::from(outcome);
        if entry.state != next {
            tracing::debug!(
                service,
                from = ?entry.state,
                to = ?next,
                "service health changed"
            );
        }
        entry.state = next;
        Some(next)
    }

    pub fn state(&self, service: &str) -> Option<HealthState> {
        self.entries.iter().find(|e| e.id == service).map(|e| e.state)
    }

    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.state = HealthState::Connected;
        }
    }

    pub fn to_vec(&self) -> Vec<ServiceHealth> {
        self.entries
            .iter()
            .map(|e| ServiceHealth {
                id: e.id.clone(),
                name: e.name.clone(),
                state: e.state,
            })
            .collect()
    }
}
