//! Outbound task projection.

use crate::task::domain::{Task, TaskStatus};
use chrono::NaiveDate;
use serde::Serialize;

/// Client-facing view of a task.
///
/// Timestamps and the concurrency revision stay internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Canonical task identifier.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Due date.
    pub due_date: NaiveDate,
    /// Lifecycle status.
    pub status: TaskStatus,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            due_date: task.due_date(),
            status: task.status(),
        }
    }
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self::from(&task)
    }
}
