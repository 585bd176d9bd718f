// Error taxonomy for the sampling pipeline. None of these are fatal to the worker.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// No sample arrived this tick; the tick is skipped and the last snapshot stays current.
    #[error("metrics feed unavailable: {0}")]
    FeedUnavailable(String),

    /// The feed produced a value that cannot be a request rate.
    #[error("invalid sample value {value}")]
    InvalidSample { value: i64 },

    /// A health probe did not answer within the tick budget.
    #[error("health probe for {service} timed out")]
    ProbeTimeout { service: String },
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
