//! Field validation for inbound task requests.
//!
//! Validation runs at the request boundary, before the lifecycle service is
//! invoked. The service trusts the field shapes it receives.

mod error;
pub mod rules;
mod service;

pub use error::{ConstraintViolation, ConstraintViolations, TaskField};
pub use service::{DefaultTaskRequestValidator, TaskRequestValidator, ValidationResult};

/// Inclusive character-count bounds for a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    min: usize,
    max: usize,
}

impl LengthBounds {
    /// Creates bounds; `min` and `max` are both inclusive.
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    pub const fn min(self) -> usize {
        self.min
    }

    /// Returns the inclusive upper bound.
    #[must_use]
    pub const fn max(self) -> usize {
        self.max
    }

    /// Returns `true` when `len` lies within the bounds.
    #[must_use]
    pub const fn contains(self, len: usize) -> bool {
        len >= self.min && len <= self.max
    }
}

/// Length limits for task text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLimits {
    title: LengthBounds,
    description: LengthBounds,
}

impl FieldLimits {
    /// Default title bounds.
    pub const TITLE: LengthBounds = LengthBounds::new(10, 60);

    /// Default description bounds.
    pub const DESCRIPTION: LengthBounds = LengthBounds::new(25, 255);

    /// Creates custom field limits.
    #[must_use]
    pub const fn new(title: LengthBounds, description: LengthBounds) -> Self {
        Self { title, description }
    }

    /// Returns the title bounds.
    #[must_use]
    pub const fn title(&self) -> LengthBounds {
        self.title
    }

    /// Returns the description bounds.
    #[must_use]
    pub const fn description(&self) -> LengthBounds {
        self.description
    }
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self::new(Self::TITLE, Self::DESCRIPTION)
    }
}
