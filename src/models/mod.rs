// Domain models

mod health;
mod sample;
mod snapshot;
mod statistics;

pub use health::{HealthState, ProbeOutcome, ServiceHealth};
pub use sample::Sample;
pub use snapshot::DashboardSnapshot;
pub use statistics::Statistics;
