//! Service layer for task creation, edits, completion and the pending sweep.

use crate::task::{
    domain::{
        InvalidTaskId, NewTask, Task, TaskDomainError, TaskId, TaskPatch, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError},
    services::SweepReport,
};
use chrono::{DateTime, Days, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Number of load-modify-save attempts before a contended mutation gives up.
pub const MAX_CONFLICT_RETRIES: usize = 8;

/// Time-based rules applied by the lifecycle service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecyclePolicy {
    eligibility_threshold: TimeDelta,
    default_due_offset: Days,
}

impl LifecyclePolicy {
    /// Minimum pending age before the sweep starts a task.
    pub const DEFAULT_ELIGIBILITY_THRESHOLD: TimeDelta = TimeDelta::minutes(5);

    /// Days added to the creation date when no due date is supplied.
    pub const DEFAULT_DUE_OFFSET_DAYS: u64 = 7;

    /// Creates a policy from explicit values.
    #[must_use]
    pub const fn new(eligibility_threshold: TimeDelta, default_due_offset: Days) -> Self {
        Self {
            eligibility_threshold,
            default_due_offset,
        }
    }

    /// Returns the minimum pending age before a task is started.
    #[must_use]
    pub const fn eligibility_threshold(&self) -> TimeDelta {
        self.eligibility_threshold
    }

    /// Returns the default due-date offset.
    #[must_use]
    pub const fn default_due_offset(&self) -> Days {
        self.default_due_offset
    }
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_ELIGIBILITY_THRESHOLD,
            Days::new(Self::DEFAULT_DUE_OFFSET_DAYS),
        )
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The external identifier is malformed.
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidTaskId),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// A domain rule rejected the mutation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Concurrent writers kept moving the task's revision.
    #[error("task {task_id} was modified concurrently {attempts} times in a row")]
    Conflict {
        /// Task identifier.
        task_id: TaskId,
        /// Attempts made before giving up.
        attempts: usize,
    },
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Outcome of attempting to start one sweep candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartOutcome {
    Started,
    NoLongerEligible,
}

/// Task lifecycle orchestration service.
///
/// Every load-modify-save sequence saves against the revision it loaded, so
/// concurrent callers (including the periodic sweep) never overwrite each
/// other's changes with stale data.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: LifecyclePolicy,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            policy: self.policy,
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with the default policy.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_policy(repository, clock, LifecyclePolicy::default())
    }

    /// Creates a new task lifecycle service with an explicit policy.
    #[must_use]
    pub const fn with_policy(repository: Arc<R>, clock: Arc<C>, policy: LifecyclePolicy) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    /// Returns the policy in force.
    #[must_use]
    pub const fn policy(&self) -> LifecyclePolicy {
        self.policy
    }

    /// Returns the current instant according to the injected clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    /// Creates a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create(&self, draft: NewTask) -> TaskLifecycleResult<Task> {
        let task = Task::create(draft, self.policy.default_due_offset(), &*self.clock);
        self.repository.insert(&task).await?;
        info!(task_id = %task.id(), due_date = %task.due_date(), "task created");
        Ok(task)
    }

    /// Retrieves a task by its external identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidIdentifier`] for malformed input,
    /// [`TaskLifecycleError::NotFound`] when no task matches, or repository
    /// errors.
    pub async fn get_by_id(&self, raw_id: &str) -> TaskLifecycleResult<Task> {
        let task_id = TaskId::decode(raw_id)?;
        self.find_task_or_error(task_id).await
    }

    /// Lists every task.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn list_all(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_all().await?)
    }

    /// Lists every task with the given status.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn list_by_status(&self, status: TaskStatus) -> TaskLifecycleResult<Vec<Task>> {
        let tasks = self.repository.find_by_status(status).await?;
        debug!(%status, count = tasks.len(), "listed tasks by status");
        Ok(tasks)
    }

    /// Applies a partial edit to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidIdentifier`],
    /// [`TaskLifecycleError::NotFound`], [`TaskDomainError::TaskCompleted`]
    /// wrapped in [`TaskLifecycleError::Domain`],
    /// [`TaskLifecycleError::Conflict`], or repository errors.
    pub async fn update(&self, raw_id: &str, patch: TaskPatch) -> TaskLifecycleResult<Task> {
        let task_id = TaskId::decode(raw_id)?;
        let task = self
            .mutate(task_id, |task, clock| task.apply_patch(&patch, clock))
            .await?;
        info!(task_id = %task_id, "task updated");
        Ok(task)
    }

    /// Permanently deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidIdentifier`],
    /// [`TaskLifecycleError::NotFound`], or repository errors.
    pub async fn delete(&self, raw_id: &str) -> TaskLifecycleResult<()> {
        let task_id = TaskId::decode(raw_id)?;
        self.repository
            .delete(task_id)
            .await
            .map_err(not_found_or_repository)?;
        info!(task_id = %task_id, "task deleted");
        Ok(())
    }

    /// Marks a task completed.
    ///
    /// Completing a completed task succeeds and leaves it completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidIdentifier`],
    /// [`TaskLifecycleError::NotFound`], [`TaskLifecycleError::Conflict`], or
    /// repository errors.
    pub async fn complete(&self, raw_id: &str) -> TaskLifecycleResult<Task> {
        let task_id = TaskId::decode(raw_id)?;
        let task = self
            .mutate(task_id, |task, clock| {
                task.complete(clock);
                Ok(())
            })
            .await?;
        info!(task_id = %task_id, "task completed");
        Ok(task)
    }

    /// Sweeps pending tasks using the injected clock's current instant.
    ///
    /// # Errors
    ///
    /// See [`Self::sweep_pending_to_in_progress`].
    pub async fn sweep_now(&self) -> TaskLifecycleResult<SweepReport> {
        self.sweep_pending_to_in_progress(self.clock.utc()).await
    }

    /// Starts every pending task whose age at `now` reaches the eligibility
    /// threshold.
    ///
    /// Candidates are saved one at a time. A failure to save one candidate is
    /// recorded in the report and does not stop the remaining candidates.
    ///
    /// # Errors
    ///
    /// Returns repository errors only when the candidate query itself fails.
    pub async fn sweep_pending_to_in_progress(
        &self,
        now: DateTime<Utc>,
    ) -> TaskLifecycleResult<SweepReport> {
        let candidates = self.repository.find_by_status(TaskStatus::Pending).await?;
        let threshold = self.policy.eligibility_threshold();
        info!(pending = candidates.len(), %now, "sweeping pending tasks");

        let mut report = SweepReport::new(now);
        for candidate in candidates {
            if !candidate.is_due_to_start(now, threshold) {
                continue;
            }
            let task_id = candidate.id();
            match self.start_candidate(candidate, now).await {
                Ok(StartOutcome::Started) => {
                    info!(task_id = %task_id, "task moved from PENDING to IN_PROGRESS");
                    report.record_started(task_id);
                }
                Ok(StartOutcome::NoLongerEligible) => {
                    debug!(task_id = %task_id, "task changed before it could be started");
                    report.record_skipped(task_id);
                }
                Err(err) => {
                    warn!(task_id = %task_id, error = %err, "failed to start pending task");
                    report.record_failure(task_id, err);
                }
            }
        }

        info!(
            started = report.started().len(),
            skipped = report.skipped().len(),
            failed = report.failures().len(),
            "sweep finished"
        );
        Ok(report)
    }

    async fn start_candidate(
        &self,
        mut candidate: Task,
        now: DateTime<Utc>,
    ) -> TaskLifecycleResult<StartOutcome> {
        let task_id = candidate.id();
        let threshold = self.policy.eligibility_threshold();
        for _ in 0..MAX_CONFLICT_RETRIES {
            let expected_revision = candidate.revision();
            if !candidate.start_if_due(now, threshold) {
                return Ok(StartOutcome::NoLongerEligible);
            }
            match self.repository.update(&candidate, expected_revision).await {
                Ok(()) => return Ok(StartOutcome::Started),
                Err(TaskRepositoryError::RevisionConflict { .. }) => {
                    let Some(fresh) = self.repository.find_by_id(task_id).await? else {
                        return Ok(StartOutcome::NoLongerEligible);
                    };
                    candidate = fresh;
                }
                Err(TaskRepositoryError::NotFound(_)) => {
                    return Ok(StartOutcome::NoLongerEligible);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(TaskLifecycleError::Conflict {
            task_id,
            attempts: MAX_CONFLICT_RETRIES,
        })
    }

    /// Runs a load-modify-save cycle, re-applying `apply` to fresh state
    /// whenever another writer saved the task in between.
    async fn mutate<F>(&self, task_id: TaskId, mut apply: F) -> TaskLifecycleResult<Task>
    where
        F: FnMut(&mut Task, &C) -> Result<(), TaskDomainError> + Send,
    {
        for attempt in 1..=MAX_CONFLICT_RETRIES {
            let mut task = self.find_task_or_error(task_id).await?;
            let expected_revision = task.revision();
            apply(&mut task, &*self.clock)?;
            match self.repository.update(&task, expected_revision).await {
                Ok(()) => return Ok(task),
                Err(TaskRepositoryError::RevisionConflict { actual, .. }) => {
                    debug!(
                        task_id = %task_id,
                        attempt,
                        expected_revision,
                        actual,
                        "revision conflict, reloading task"
                    );
                }
                Err(err) => return Err(not_found_or_repository(err)),
            }
        }
        Err(TaskLifecycleError::Conflict {
            task_id,
            attempts: MAX_CONFLICT_RETRIES,
        })
    }
}

fn not_found_or_repository(err: TaskRepositoryError) -> TaskLifecycleError {
    match err {
        TaskRepositoryError::NotFound(task_id) => TaskLifecycleError::NotFound(task_id),
        other => TaskLifecycleError::Repository(other),
    }
}
