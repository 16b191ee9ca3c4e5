//! Default request validator.

use super::{ConstraintViolation, ConstraintViolations, FieldLimits, TaskField, rules};
use crate::task::{
    commands::{CreateTaskRequest, UpdateTaskRequest},
    domain::{NewTask, TaskPatch},
};
use chrono::NaiveDate;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ConstraintViolations>;

/// Port for validating inbound task requests before they reach the engine.
///
/// Implementations collect every violation instead of stopping at the first.
pub trait TaskRequestValidator: Send + Sync {
    /// Validates a create request against `today` and converts it to a draft.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    fn validate_create(
        &self,
        request: CreateTaskRequest,
        today: NaiveDate,
    ) -> ValidationResult<NewTask>;

    /// Validates an update request against `today` and converts it to a
    /// patch.
    ///
    /// # Errors
    ///
    /// Returns every violated rule.
    fn validate_update(
        &self,
        request: UpdateTaskRequest,
        today: NaiveDate,
    ) -> ValidationResult<TaskPatch>;
}

/// Default implementation of [`TaskRequestValidator`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tasklane::task::commands::CreateTaskRequest;
/// use tasklane::task::validation::{DefaultTaskRequestValidator, TaskRequestValidator};
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date");
/// let validator = DefaultTaskRequestValidator::new();
/// let request = CreateTaskRequest::new(
///     "Write the release notes",
///     "Summarise every change merged since the last tag",
/// );
/// assert!(validator.validate_create(request, today).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultTaskRequestValidator {
    limits: FieldLimits,
}

impl DefaultTaskRequestValidator {
    /// Creates a validator with the default field limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with custom field limits.
    #[must_use]
    pub const fn with_limits(limits: FieldLimits) -> Self {
        Self { limits }
    }

    /// Returns the field limits in force.
    #[must_use]
    pub const fn limits(&self) -> &FieldLimits {
        &self.limits
    }
}

impl TaskRequestValidator for DefaultTaskRequestValidator {
    fn validate_create(
        &self,
        request: CreateTaskRequest,
        today: NaiveDate,
    ) -> ValidationResult<NewTask> {
        let mut violations = Vec::new();
        collect(&mut violations, rules::validate_title(&request.title, &self.limits));
        collect(
            &mut violations,
            rules::validate_description(&request.description, &self.limits),
        );
        if let Some(due_date) = request.due_date {
            collect(
                &mut violations,
                rules::validate_future_date(TaskField::DueDate, due_date, today),
            );
        }
        finish(violations)?;

        Ok(NewTask {
            title: request.title,
            description: request.description,
            due_date: request.due_date,
        })
    }

    fn validate_update(
        &self,
        request: UpdateTaskRequest,
        today: NaiveDate,
    ) -> ValidationResult<TaskPatch> {
        if request.title.is_none() && request.description.is_none() && request.due_date.is_none()
        {
            return Err(ConstraintViolations::new(vec![
                ConstraintViolation::EmptyUpdate,
            ]));
        }

        let mut violations = Vec::new();
        if let Some(title) = request.title.as_deref() {
            collect(
                &mut violations,
                rules::validate_length(TaskField::Title, title, self.limits.title()),
            );
        }
        if let Some(description) = request.description.as_deref() {
            collect(
                &mut violations,
                rules::validate_length(
                    TaskField::Description,
                    description,
                    self.limits.description(),
                ),
            );
        }
        if let Some(due_date) = request.due_date {
            collect(
                &mut violations,
                rules::validate_future_date(TaskField::DueDate, due_date, today),
            );
        }
        finish(violations)?;

        let mut patch = TaskPatch::new();
        if let Some(title) = request.title {
            patch = patch.with_title(title);
        }
        if let Some(description) = request.description {
            patch = patch.with_description(description);
        }
        if let Some(due_date) = request.due_date {
            patch = patch.with_due_date(due_date);
        }
        Ok(patch)
    }
}

fn collect(violations: &mut Vec<ConstraintViolation>, result: Result<(), ConstraintViolation>) {
    if let Err(violation) = result {
        violations.push(violation);
    }
}

fn finish(violations: Vec<ConstraintViolation>) -> ValidationResult<()> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ConstraintViolations::new(violations))
    }
}
