//! Manually driven clock for deterministic lifecycle flows.

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use std::sync::{Arc, RwLock};

/// Clock whose current instant only moves when told to.
///
/// Clones share the same instant, so a test can hold one handle while the
/// service and advancer hold others.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock frozen at `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(now)),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        match self.now.write() {
            Ok(mut guard) => *guard = now,
            Err(poisoned) => *poisoned.into_inner() = now,
        }
    }

    /// Moves the clock by `delta`, saturating at the representable range.
    ///
    /// The read and the write happen under one guard, so concurrent
    /// advances through shared clones are never lost.
    pub fn advance(&self, delta: TimeDelta) {
        let step = |now: DateTime<Utc>| {
            now.checked_add_signed(delta).unwrap_or(if delta < TimeDelta::zero() {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
        };
        match self.now.write() {
            Ok(mut guard) => *guard = step(*guard),
            Err(poisoned) => {
                let mut guard = poisoned.into_inner();
                *guard = step(*guard);
            }
        }
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        match self.now.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
