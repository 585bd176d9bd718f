// One RPS observation

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// A single `(timestamp, value)` observation. Fields are private so a sample
/// cannot change after it has been accepted into a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    timestamp: u64,
    value: u64,
}

impl Sample {
    /// Validates a raw feed reading. Negative rates are rejected.
    pub fn new(timestamp: u64, raw: i64) -> Result<Self> {
        let value = u64::try_from(raw).map_err(|_| DashboardError::InvalidSample { value: raw })?;
        Ok(Self { timestamp, value })
    }

    /// When the reading was observed, ms since the Unix epoch.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}
