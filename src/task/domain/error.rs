//! Error types for task domain rules and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned when a domain rule rejects a task mutation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// Completed tasks are terminal and reject field edits.
    #[error("task {0} is completed and can no longer be edited")]
    TaskCompleted(TaskId),
}

/// Error returned while parsing task statuses from external input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned when an external identifier is not a canonical UUID.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task identifier: {0}")]
pub struct InvalidTaskId(pub String);
