//! Constraint violations raised by request validation.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Request field subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    /// Task title.
    Title,
    /// Task description.
    Description,
    /// Task due date.
    DueDate,
}

impl TaskField {
    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::DueDate => "dueDate",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violated field rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// A mandatory text field is missing or blank.
    #[error("{0} is mandatory")]
    Blank(TaskField),

    /// A text field is outside its length bounds.
    #[error("{field} must be between {min} and {max} characters, got {actual}")]
    Length {
        /// Offending field.
        field: TaskField,
        /// Inclusive lower bound.
        min: usize,
        /// Inclusive upper bound.
        max: usize,
        /// Length supplied, in characters.
        actual: usize,
    },

    /// The due date is not strictly after the current date.
    #[error("{field} {due_date} must be in the future (today is {today})")]
    NotInFuture {
        /// Offending field.
        field: TaskField,
        /// Supplied date.
        due_date: NaiveDate,
        /// Current date the rule was evaluated against.
        today: NaiveDate,
    },

    /// An update request carried no field at all.
    #[error("at least one field must be provided to update")]
    EmptyUpdate,
}

impl ConstraintViolation {
    /// Returns the field the violation refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<TaskField> {
        match self {
            Self::Blank(field)
            | Self::Length { field, .. }
            | Self::NotInFuture { field, .. } => Some(*field),
            Self::EmptyUpdate => None,
        }
    }
}

/// Every rule a request violated, in evaluation order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task request: {}", format_violations(.0))]
pub struct ConstraintViolations(Vec<ConstraintViolation>);

fn format_violations(violations: &[ConstraintViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConstraintViolations {
    pub(crate) const fn new(violations: Vec<ConstraintViolation>) -> Self {
        Self(violations)
    }

    /// Returns the individual violations.
    #[must_use]
    pub fn violations(&self) -> &[ConstraintViolation] {
        &self.0
    }

    /// Returns `true` when any violation refers to `field`.
    #[must_use]
    pub fn concerns(&self, field: TaskField) -> bool {
        self.0.iter().any(|violation| violation.field() == Some(field))
    }
}
