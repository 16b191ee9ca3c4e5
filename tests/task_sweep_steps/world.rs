//! Shared world state for task sweep BDD scenarios.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::fixture;
use tasklane::task::{
    adapters::memory::{InMemoryTaskRepository, ManualClock},
    commands::{TaskCommandHandler, TaskCommandResult, TaskView},
    services::{SweepReport, TaskLifecycleService},
};

/// Handler type used by the BDD world.
pub type TestTaskHandler = TaskCommandHandler<InMemoryTaskRepository, ManualClock>;

/// Scenario world for task sweep behaviour tests.
pub struct TaskSweepWorld {
    pub handler: TestTaskHandler,
    pub clock: ManualClock,
    pub last_task: Option<TaskView>,
    pub last_report: Option<SweepReport>,
    pub last_edit: Option<TaskCommandResult<TaskView>>,
}

impl TaskSweepWorld {
    /// Creates a world with an empty store and a frozen clock.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2025, 6, 2, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        let clock = ManualClock::new(start);
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(clock.clone()),
        );

        Self {
            handler: TaskCommandHandler::new(service),
            clock,
            last_task: None,
            last_report: None,
            last_edit: None,
        }
    }

    /// Returns the task the scenario is working with.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn current_task(&self) -> Result<&TaskView, eyre::Report> {
        self.last_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))
    }
}

impl Default for TaskSweepWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskSweepWorld {
    TaskSweepWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
