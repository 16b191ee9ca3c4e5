//! Periodic background advancer for pending tasks.
//!
//! The advancer owns a single loop that fires the lifecycle sweep on a fixed
//! period. The loop awaits each sweep before waiting for the next tick, and
//! ticks missed while a sweep is still running are skipped, so two sweeps
//! never run at the same time.

use super::TaskLifecycleService;
use crate::task::ports::TaskRepository;
use mockable::Clock;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Default interval between sweeps.
pub const DEFAULT_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Counters accumulated over the advancer's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvancerStats {
    /// Sweeps fired.
    pub firings: u64,
    /// Tasks moved to in-progress across all sweeps.
    pub started: u64,
    /// Individual candidate saves that failed.
    pub failed_records: u64,
    /// Sweeps that failed as a whole (query failure or panic).
    pub failed_firings: u64,
}

/// Errors returned while stopping the advancer.
#[derive(Debug, Error)]
pub enum AdvancerError {
    /// The advancer loop panicked or was aborted.
    #[error("advancer loop terminated abnormally: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Recurring trigger for [`TaskLifecycleService::sweep_now`].
pub struct PeriodicAdvancer<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    service: TaskLifecycleService<R, C>,
    period: Duration,
}

impl<R, C> PeriodicAdvancer<R, C>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates an advancer firing every [`DEFAULT_SWEEP_PERIOD`].
    #[must_use]
    pub const fn new(service: TaskLifecycleService<R, C>) -> Self {
        Self::with_period(service, DEFAULT_SWEEP_PERIOD)
    }

    /// Creates an advancer with an explicit period.
    #[must_use]
    pub const fn with_period(service: TaskLifecycleService<R, C>, period: Duration) -> Self {
        Self { service, period }
    }

    /// Returns the firing period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Spawns the advancer loop on the current tokio runtime.
    ///
    /// The first sweep fires immediately.
    #[must_use = "dropping the handle detaches the advancer without a way to stop it"]
    pub fn start(self) -> AdvancerHandle {
        let cancellation = CancellationToken::new();
        let join = tokio::spawn(self.run(cancellation.clone()));
        AdvancerHandle { cancellation, join }
    }

    async fn run(self, cancellation: CancellationToken) -> AdvancerStats {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut stats = AdvancerStats::default();
        info!(period_secs = self.period.as_secs(), "periodic advancer started");

        loop {
            tokio::select! {
                biased;
                () = cancellation.cancelled() => break,
                _ = ticker.tick() => {}
            }
            self.fire(&mut stats).await;
        }

        info!(
            firings = stats.firings,
            started = stats.started,
            "periodic advancer stopped"
        );
        stats
    }

    /// Runs one sweep to completion on its own task so that a panic inside
    /// the sweep is contained to this firing.
    async fn fire(&self, stats: &mut AdvancerStats) {
        stats.firings = stats.firings.saturating_add(1);
        let service = self.service.clone();
        let outcome = tokio::spawn(async move { service.sweep_now().await }).await;

        match outcome {
            Ok(Ok(report)) => {
                stats.started = stats.started.saturating_add(len_as_u64(report.started().len()));
                stats.failed_records = stats
                    .failed_records
                    .saturating_add(len_as_u64(report.failures().len()));
            }
            Ok(Err(err)) => {
                stats.failed_firings = stats.failed_firings.saturating_add(1);
                warn!(error = %err, "sweep failed");
            }
            Err(join_err) => {
                stats.failed_firings = stats.failed_firings.saturating_add(1);
                error!(error = %join_err, "sweep task aborted");
            }
        }
    }
}

fn len_as_u64(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

/// Handle to a running [`PeriodicAdvancer`].
#[derive(Debug)]
pub struct AdvancerHandle {
    cancellation: CancellationToken,
    join: JoinHandle<AdvancerStats>,
}

impl AdvancerHandle {
    /// Returns a token that stops the advancer when cancelled.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Returns `true` once the loop has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Stops the advancer and waits for the loop to exit.
    ///
    /// A sweep already in flight runs to completion first; each of its saves
    /// is atomic, so no task is left half-updated.
    ///
    /// # Errors
    ///
    /// Returns [`AdvancerError::Join`] if the loop panicked.
    pub async fn shutdown(self) -> Result<AdvancerStats, AdvancerError> {
        self.cancellation.cancel();
        Ok(self.join.await?)
    }
}
