// Service connectivity states and probe outcomes

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    #[default]
    Connected,
    Disconnected,
    Error,
}

/// Result of one health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Healthy,
    Unhealthy,
    /// The probe got no answer at all (timeout, no response).
    NoSignal,
}

impl ProbeOutcome {
    pub fn from_healthy(healthy: bool) -> Self {
        if healthy { Self::Healthy } else { Self::Unhealthy }
    }
}

impl From<ProbeOutcome> for HealthState {
    fn from(outcome: ProbeOutcome) -> Self {
        match outcome {
            ProbeOutcome::Healthy => HealthState::Connected,
            ProbeOutcome::Unhealthy => HealthState::Error,
            ProbeOutcome::NoSignal => HealthState::Disconnected,
        }
    }
}

/// Current state of one monitored service, as handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub id: String,
    pub name: String,
    pub state: HealthState,
}
