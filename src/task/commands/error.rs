//! Error taxonomy exposed at the request boundary.

use crate::task::{
    domain::{InvalidTaskId, ParseTaskStatusError, TaskDomainError, TaskId},
    ports::TaskRepositoryError,
    services::TaskLifecycleError,
    validation::ConstraintViolations,
};
use thiserror::Error;

/// Failures a transport adapter maps onto its own error surface.
#[derive(Debug, Error)]
pub enum TaskCommandError {
    /// The identifier string is malformed.
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidTaskId),

    /// The status filter is not a known status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// No task exists with the identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// Request fields violate their constraints.
    #[error(transparent)]
    ConstraintViolation(#[from] ConstraintViolations),

    /// The task is completed and rejects edits.
    #[error("task {0} is completed and can no longer be edited")]
    TaskCompleted(TaskId),

    /// Concurrent writers kept the task busy; the caller may retry.
    #[error("task {0} is being modified concurrently, retry later")]
    Conflict(TaskId),

    /// The underlying store failed.
    #[error("task store failure: {0}")]
    StoreFailure(TaskRepositoryError),
}

impl TaskCommandError {
    /// Returns `true` for failures caused by the caller's input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier(_)
                | Self::InvalidStatus(_)
                | Self::NotFound(_)
                | Self::ConstraintViolation(_)
                | Self::TaskCompleted(_)
        )
    }
}

impl From<TaskLifecycleError> for TaskCommandError {
    fn from(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::InvalidIdentifier(invalid) => Self::InvalidIdentifier(invalid),
            TaskLifecycleError::NotFound(task_id) => Self::NotFound(task_id),
            TaskLifecycleError::Domain(TaskDomainError::TaskCompleted(task_id)) => {
                Self::TaskCompleted(task_id)
            }
            TaskLifecycleError::Conflict { task_id, .. } => Self::Conflict(task_id),
            TaskLifecycleError::Repository(TaskRepositoryError::NotFound(task_id)) => {
                Self::NotFound(task_id)
            }
            TaskLifecycleError::Repository(repository_err) => Self::StoreFailure(repository_err),
        }
    }
}
