// Derived RPS statistics

use serde::{Deserialize, Serialize};

/// Current, running-peak and window-average request rate.
/// Always produced by [`crate::aggregator::aggregate`], never edited in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub current: u64,
    pub peak: u64,
    pub average: u64,
}
