//! Individual field rules.
//!
//! Each rule is a pure function returning `Ok(())` or the violation it
//! detected. Lengths are counted in Unicode scalar values.

use super::{ConstraintViolation, FieldLimits, LengthBounds, TaskField};
use chrono::NaiveDate;

/// Validates a mandatory text field: non-blank and within bounds.
///
/// # Errors
///
/// Returns [`ConstraintViolation::Blank`] or [`ConstraintViolation::Length`].
pub fn validate_required_text(
    field: TaskField,
    value: &str,
    bounds: LengthBounds,
) -> Result<(), ConstraintViolation> {
    if value.trim().is_empty() {
        return Err(ConstraintViolation::Blank(field));
    }
    validate_length(field, value, bounds)
}

/// Validates that a text field is within its length bounds.
///
/// # Errors
///
/// Returns [`ConstraintViolation::Length`] when out of bounds.
pub fn validate_length(
    field: TaskField,
    value: &str,
    bounds: LengthBounds,
) -> Result<(), ConstraintViolation> {
    let actual = value.chars().count();
    if !bounds.contains(actual) {
        return Err(ConstraintViolation::Length {
            field,
            min: bounds.min(),
            max: bounds.max(),
            actual,
        });
    }
    Ok(())
}

/// Validates that a date is strictly after `today`.
///
/// # Errors
///
/// Returns [`ConstraintViolation::NotInFuture`] for today or earlier.
pub fn validate_future_date(
    field: TaskField,
    due_date: NaiveDate,
    today: NaiveDate,
) -> Result<(), ConstraintViolation> {
    if due_date <= today {
        return Err(ConstraintViolation::NotInFuture {
            field,
            due_date,
            today,
        });
    }
    Ok(())
}

/// Validates the title of a create request.
///
/// # Errors
///
/// See [`validate_required_text`].
pub fn validate_title(title: &str, limits: &FieldLimits) -> Result<(), ConstraintViolation> {
    validate_required_text(TaskField::Title, title, limits.title())
}

/// Validates the description of a create request.
///
/// # Errors
///
/// See [`validate_required_text`].
pub fn validate_description(
    description: &str,
    limits: &FieldLimits,
) -> Result<(), ConstraintViolation> {
    validate_required_text(TaskField::Description, description, limits.description())
}
