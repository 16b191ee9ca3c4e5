//! Application services for task lifecycle orchestration.

mod advancer;
mod lifecycle;
mod sweep;

pub use advancer::{
    AdvancerError, AdvancerHandle, AdvancerStats, DEFAULT_SWEEP_PERIOD, PeriodicAdvancer,
};
pub use lifecycle::{
    LifecyclePolicy, MAX_CONFLICT_RETRIES, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
pub use sweep::{SweepFailure, SweepReport};
