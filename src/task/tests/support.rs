//! Shared fixtures and repository doubles for task unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use mockall::mock;
use rstest::fixture;

use crate::task::{
    adapters::memory::{InMemoryTaskRepository, ManualClock},
    domain::{NewTask, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::TaskLifecycleService,
};

pub const VALID_TITLE: &str = "Prepare sprint review";
pub const VALID_DESCRIPTION: &str = "Collect demo material from every squad for Friday";

pub type TestService = TaskLifecycleService<InMemoryTaskRepository, ManualClock>;

pub fn start_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0)
        .single()
        .expect("valid fixed instant")
}

#[fixture]
pub fn clock() -> ManualClock {
    ManualClock::new(start_instant())
}

#[fixture]
pub fn repository() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

pub fn service_with(repository: &InMemoryTaskRepository, clock: &ManualClock) -> TestService {
    TaskLifecycleService::new(Arc::new(repository.clone()), Arc::new(clock.clone()))
}

/// Service wired to handles the test can inspect and drive.
pub struct Harness {
    pub service: TestService,
    pub repository: InMemoryTaskRepository,
    pub clock: ManualClock,
}

#[fixture]
pub fn harness(repository: InMemoryTaskRepository, clock: ManualClock) -> Harness {
    Harness {
        service: service_with(&repository, &clock),
        repository,
        clock,
    }
}

pub fn valid_draft() -> NewTask {
    NewTask::new(VALID_TITLE, VALID_DESCRIPTION)
}

mock! {
    pub Repository {}

    #[async_trait]
    impl TaskRepository for Repository {
        async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn update(&self, task: &Task, expected_revision: u64) -> TaskRepositoryResult<()>;
        async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
        async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
        async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;
        async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>>;
    }
}

pub fn store_unavailable() -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other("store unavailable"))
}

/// Delegates to an in-memory store but fails updates for selected tasks.
#[derive(Debug, Default)]
pub struct FlakyTaskRepository {
    inner: InMemoryTaskRepository,
    failing: Mutex<HashSet<TaskId>>,
}

impl FlakyTaskRepository {
    pub fn wrapping(inner: InMemoryTaskRepository) -> Self {
        Self {
            inner,
            failing: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_updates_for(&self, task_id: TaskId) {
        self.failing
            .lock()
            .expect("failing set lock")
            .insert(task_id);
    }

    fn should_fail(&self, task_id: TaskId) -> bool {
        self.failing
            .lock()
            .expect("failing set lock")
            .contains(&task_id)
    }
}

#[async_trait]
impl TaskRepository for FlakyTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.inner.insert(task).await
    }

    async fn update(&self, task: &Task, expected_revision: u64) -> TaskRepositoryResult<()> {
        if self.should_fail(task.id()) {
            return Err(store_unavailable());
        }
        self.inner.update(task, expected_revision).await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.inner.delete(id).await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.find_by_status(status).await
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.find_all().await
    }
}

/// Completes every candidate right after the sweep has read it, simulating
/// a client request racing the sweep.
#[derive(Debug)]
pub struct RacingCompletionRepository {
    inner: InMemoryTaskRepository,
    clock: ManualClock,
}

impl RacingCompletionRepository {
    pub const fn wrapping(inner: InMemoryTaskRepository, clock: ManualClock) -> Self {
        Self { inner, clock }
    }
}

#[async_trait]
impl TaskRepository for RacingCompletionRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.inner.insert(task).await
    }

    async fn update(&self, task: &Task, expected_revision: u64) -> TaskRepositoryResult<()> {
        self.inner.update(task, expected_revision).await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.inner.delete(id).await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let snapshot = self.inner.find_by_status(status).await?;
        for stale in &snapshot {
            let mut racing = stale.clone();
            racing.complete(&self.clock);
            self.inner.update(&racing, stale.revision()).await?;
        }
        Ok(snapshot)
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.find_all().await
    }
}

/// Deletes every candidate right after the sweep has read it, simulating
/// a client delete racing the sweep.
#[derive(Debug)]
pub struct RacingDeletionRepository {
    inner: InMemoryTaskRepository,
}

impl RacingDeletionRepository {
    pub const fn wrapping(inner: InMemoryTaskRepository) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TaskRepository for RacingDeletionRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.inner.insert(task).await
    }

    async fn update(&self, task: &Task, expected_revision: u64) -> TaskRepositoryResult<()> {
        self.inner.update(task, expected_revision).await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.inner.delete(id).await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let snapshot = self.inner.find_by_status(status).await?;
        for stale in &snapshot {
            self.inner.delete(stale.id()).await?;
        }
        Ok(snapshot)
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.find_all().await
    }
}

/// Delays status queries and records how many run at once.
#[derive(Debug)]
pub struct SlowTaskRepository {
    inner: InMemoryTaskRepository,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl SlowTaskRepository {
    pub const fn wrapping(inner: InMemoryTaskRepository, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskRepository for SlowTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.inner.insert(task).await
    }

    async fn update(&self, task: &Task, expected_revision: u64) -> TaskRepositoryResult<()> {
        self.inner.update(task, expected_revision).await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.inner.delete(id).await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.inner.find_by_status(status).await
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.find_all().await
    }
}
