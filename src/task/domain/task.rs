//! Task aggregate root and its lifecycle state machine.

use super::{NewTask, ParseTaskStatusError, TaskDomainError, TaskId, TaskPatch};
use chrono::{DateTime, Days, NaiveDate, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task has been created and is waiting to be picked up.
    Pending,
    /// Task has been waiting long enough to be considered active.
    InProgress,
    /// Task has been explicitly completed.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical external representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    /// Returns `true` for states with no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns `true` when `self -> target` is an edge of the state machine.
    ///
    /// Self-loops are not edges; re-completing a completed task is handled
    /// by [`Task::complete`] as an idempotent re-application.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::InProgress | Self::Completed)
                | (Self::InProgress, Self::Completed)
        )
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    due_date: NaiveDate,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    revision: u64,
}

impl Task {
    /// Revision assigned to a task before its first save.
    pub const INITIAL_REVISION: u64 = 1;

    /// Creates a new pending task.
    ///
    /// Both timestamps come from a single clock reading, so a fresh task
    /// always has `created_at == updated_at`. When the draft carries no due
    /// date, the due date becomes the creation date plus `default_due_offset`.
    #[must_use]
    pub fn create(draft: NewTask, default_due_offset: Days, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let due_date = draft.due_date.unwrap_or_else(|| {
            timestamp
                .date_naive()
                .checked_add_days(default_due_offset)
                .unwrap_or(NaiveDate::MAX)
        });

        Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            due_date,
            status: TaskStatus::Pending,
            created_at: timestamp,
            updated_at: timestamp,
            revision: Self::INITIAL_REVISION,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the optimistic concurrency revision.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` when the task is pending and at least `threshold` old
    /// at `now`.
    #[must_use]
    pub fn is_due_to_start(&self, now: DateTime<Utc>, threshold: TimeDelta) -> bool {
        self.status == TaskStatus::Pending
            && now.signed_duration_since(self.created_at) >= threshold
    }

    /// Applies a partial edit.
    ///
    /// Present, non-blank text fields and a present due date overwrite the
    /// stored values. The creation timestamp is never touched, so an edit
    /// does not reset the pending age used by the sweep.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskCompleted`] when the task is terminal.
    pub fn apply_patch(
        &mut self,
        patch: &TaskPatch,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.status.is_terminal() {
            return Err(TaskDomainError::TaskCompleted(self.id));
        }
        if let Some(title) = non_blank(patch.title.as_deref()) {
            title.clone_into(&mut self.title);
        }
        if let Some(description) = non_blank(patch.description.as_deref()) {
            description.clone_into(&mut self.description);
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        self.touch(clock);
        Ok(())
    }

    /// Marks the task completed from any state.
    ///
    /// Completing an already completed task re-applies the same state and
    /// refreshes `updated_at`.
    pub fn complete(&mut self, clock: &impl Clock) {
        debug_assert!(
            self.status == TaskStatus::Completed
                || self.status.can_transition_to(TaskStatus::Completed),
            "every non-terminal status has an edge to completed"
        );
        self.status = TaskStatus::Completed;
        self.touch(clock);
    }

    /// Moves a pending task to in-progress when it is due at `now`.
    ///
    /// Only the status and revision change; timestamps are left as they are.
    /// Returns `false` without modifying the task when it is not eligible.
    pub fn start_if_due(&mut self, now: DateTime<Utc>, threshold: TimeDelta) -> bool {
        if !self.is_due_to_start(now, threshold) {
            return false;
        }
        self.status = TaskStatus::InProgress;
        self.bump_revision();
        true
    }

    /// Refreshes `updated_at`, never letting it fall behind `created_at`.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc().max(self.created_at);
        self.bump_revision();
    }

    const fn bump_revision(&mut self) {
        self.revision = self.revision.saturating_add(1);
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
