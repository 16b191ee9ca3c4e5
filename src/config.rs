//! Runtime configuration for the task advancer.
//!
//! Configuration is read from environment variables:
//! - `TASKLANE_SWEEP_PERIOD_SECS` - Optional. Seconds between sweeps. Defaults to `60`.
//! - `TASKLANE_PENDING_THRESHOLD_SECS` - Optional. Pending age in seconds before a
//!   task is started. Defaults to `300`.
//! - `TASKLANE_DEFAULT_DUE_DAYS` - Optional. Days added to the creation date when
//!   no due date is supplied. Defaults to `7`, at most `36525`.

use crate::task::services::{DEFAULT_SWEEP_PERIOD, LifecyclePolicy};
use chrono::{Days, TimeDelta};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the sweep period.
pub const SWEEP_PERIOD_VAR: &str = "TASKLANE_SWEEP_PERIOD_SECS";
/// Environment variable holding the pending threshold.
pub const PENDING_THRESHOLD_VAR: &str = "TASKLANE_PENDING_THRESHOLD_SECS";
/// Environment variable holding the default due-date offset.
pub const DEFAULT_DUE_DAYS_VAR: &str = "TASKLANE_DEFAULT_DUE_DAYS";
/// Largest accepted default due-date offset, one hundred years.
pub const MAX_DEFAULT_DUE_DAYS: u64 = 36_525;

/// Errors returned while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is not a non-negative integer, or is out of range.
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
        /// Parse failure.
        reason: String,
    },

    /// A variable that must be positive is zero.
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Advancer and lifecycle configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvancerConfig {
    /// Time between sweeps.
    pub sweep_period: Duration,
    /// Pending age before a task is started.
    pub pending_threshold: Duration,
    /// Days added to the creation date when no due date is supplied.
    pub default_due_days: u64,
}

impl Default for AdvancerConfig {
    fn default() -> Self {
        Self {
            sweep_period: DEFAULT_SWEEP_PERIOD,
            pending_threshold: Duration::from_secs(300),
            default_due_days: LifecyclePolicy::DEFAULT_DUE_OFFSET_DAYS,
        }
    }
}

impl AdvancerConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// absent variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but invalid,
    /// including values too large to drive the lifecycle policy.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let sweep_period = parse_u64(&lookup, SWEEP_PERIOD_VAR)?
            .map(|secs| positive(SWEEP_PERIOD_VAR, secs).map(Duration::from_secs))
            .transpose()?
            .unwrap_or(defaults.sweep_period);

        let pending_threshold = parse_u64(&lookup, PENDING_THRESHOLD_VAR)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.pending_threshold);

        let default_due_days = parse_u64(&lookup, DEFAULT_DUE_DAYS_VAR)?
            .map(|days| positive(DEFAULT_DUE_DAYS_VAR, days))
            .transpose()?
            .unwrap_or(defaults.default_due_days);

        let config = Self {
            sweep_period,
            pending_threshold,
            default_due_days,
        };
        config.lifecycle_policy()?;
        Ok(config)
    }

    /// Returns the lifecycle policy described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the pending threshold does
    /// not fit a [`TimeDelta`] or the due-date offset exceeds
    /// [`MAX_DEFAULT_DUE_DAYS`].
    pub fn lifecycle_policy(&self) -> Result<LifecyclePolicy, ConfigError> {
        let threshold =
            TimeDelta::from_std(self.pending_threshold).map_err(|err| ConfigError::InvalidValue {
                name: PENDING_THRESHOLD_VAR,
                value: self.pending_threshold.as_secs().to_string(),
                reason: err.to_string(),
            })?;
        if self.default_due_days > MAX_DEFAULT_DUE_DAYS {
            return Err(ConfigError::InvalidValue {
                name: DEFAULT_DUE_DAYS_VAR,
                value: self.default_due_days.to_string(),
                reason: format!("must be at most {MAX_DEFAULT_DUE_DAYS}"),
            });
        }
        Ok(LifecyclePolicy::new(
            threshold,
            Days::new(self.default_due_days),
        ))
    }
}

fn parse_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<u64>, ConfigError> {
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|err| ConfigError::InvalidValue {
                    name,
                    value: raw.clone(),
                    reason: err.to_string(),
                })
        })
        .transpose()
}

const fn positive(name: &'static str, value: u64) -> Result<u64, ConfigError> {
    if value == 0 {
        return Err(ConfigError::Zero(name));
    }
    Ok(value)
}
