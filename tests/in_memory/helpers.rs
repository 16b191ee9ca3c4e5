//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rstest::fixture;
use tasklane::task::{
    adapters::memory::{InMemoryTaskRepository, ManualClock},
    commands::{CreateTaskRequest, TaskCommandHandler},
    services::TaskLifecycleService,
};

/// Service type wired to the in-memory adapters.
pub type TestService = TaskLifecycleService<InMemoryTaskRepository, ManualClock>;

/// Handler type wired to the in-memory adapters.
pub type TestHandler = TaskCommandHandler<InMemoryTaskRepository, ManualClock>;

/// A title within the default length bounds.
pub const TITLE: &str = "Draft the onboarding guide";

/// A description within the default length bounds.
pub const DESCRIPTION: &str = "Cover tooling setup, access requests and the first week";

/// Handles shared by a test and the components under test.
pub struct Stack {
    pub handler: TestHandler,
    pub repository: InMemoryTaskRepository,
    pub clock: ManualClock,
}

impl Stack {
    /// Returns the lifecycle service behind the handler.
    #[must_use]
    pub const fn service(&self) -> &TestService {
        self.handler.service()
    }
}

/// Returns the fixed instant every test starts from.
///
/// # Panics
///
/// Panics if the hard-coded instant is invalid.
#[must_use]
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 8, 30, 0)
        .single()
        .expect("valid fixed instant")
}

/// Provides a fully wired in-memory stack.
#[fixture]
pub fn stack() -> Stack {
    let repository = InMemoryTaskRepository::new();
    let clock = ManualClock::new(epoch());
    let service =
        TaskLifecycleService::new(Arc::new(repository.clone()), Arc::new(clock.clone()));
    Stack {
        handler: TaskCommandHandler::new(service),
        repository,
        clock,
    }
}

/// Returns a create request that passes validation.
#[must_use]
pub fn valid_request() -> CreateTaskRequest {
    CreateTaskRequest::new(TITLE, DESCRIPTION)
}
