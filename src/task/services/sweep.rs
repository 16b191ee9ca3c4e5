//! Per-sweep outcome accounting.

use super::TaskLifecycleError;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};

/// A candidate the sweep could not start.
#[derive(Debug)]
pub struct SweepFailure {
    task_id: TaskId,
    error: TaskLifecycleError,
}

impl SweepFailure {
    /// Returns the identifier of the task that failed.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the failure cause.
    #[must_use]
    pub const fn error(&self) -> &TaskLifecycleError {
        &self.error
    }
}

/// Outcome of one pending-to-in-progress sweep.
#[derive(Debug)]
pub struct SweepReport {
    swept_at: DateTime<Utc>,
    started: Vec<TaskId>,
    skipped: Vec<TaskId>,
    failures: Vec<SweepFailure>,
}

impl SweepReport {
    pub(crate) const fn new(swept_at: DateTime<Utc>) -> Self {
        Self {
            swept_at,
            started: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub(crate) fn record_started(&mut self, task_id: TaskId) {
        self.started.push(task_id);
    }

    pub(crate) fn record_skipped(&mut self, task_id: TaskId) {
        self.skipped.push(task_id);
    }

    pub(crate) fn record_failure(&mut self, task_id: TaskId, error: TaskLifecycleError) {
        self.failures.push(SweepFailure { task_id, error });
    }

    /// Returns the instant the sweep evaluated eligibility against.
    #[must_use]
    pub const fn swept_at(&self) -> DateTime<Utc> {
        self.swept_at
    }

    /// Returns the tasks moved to in-progress.
    #[must_use]
    pub fn started(&self) -> &[TaskId] {
        &self.started
    }

    /// Returns eligible candidates that a concurrent mutation made
    /// ineligible (completed or deleted) before they could be started.
    #[must_use]
    pub fn skipped(&self) -> &[TaskId] {
        &self.skipped
    }

    /// Returns the candidates that failed to save.
    #[must_use]
    pub fn failures(&self) -> &[SweepFailure] {
        &self.failures
    }

    /// Returns `true` when no candidate failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
