//! Request-boundary command handler.

use super::{CreateTaskRequest, TaskCommandError, TaskView, UpdateTaskRequest};
use crate::task::{
    domain::TaskStatus,
    ports::TaskRepository,
    services::TaskLifecycleService,
    validation::{DefaultTaskRequestValidator, TaskRequestValidator},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

/// Result type for command handler operations.
pub type TaskCommandResult<T> = Result<T, TaskCommandError>;

/// Validates inbound requests and dispatches them to the lifecycle service.
///
/// The service is never invoked for a request that fails validation.
pub struct TaskCommandHandler<R, C, V = DefaultTaskRequestValidator>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    V: TaskRequestValidator,
{
    service: TaskLifecycleService<R, C>,
    validator: Arc<V>,
}

impl<R, C> TaskCommandHandler<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a handler using [`DefaultTaskRequestValidator`].
    #[must_use]
    pub fn new(service: TaskLifecycleService<R, C>) -> Self {
        Self::with_validator(service, Arc::new(DefaultTaskRequestValidator::new()))
    }
}

impl<R, C, V> TaskCommandHandler<R, C, V>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    V: TaskRequestValidator,
{
    /// Creates a handler with a custom validator.
    #[must_use]
    pub const fn with_validator(service: TaskLifecycleService<R, C>, validator: Arc<V>) -> Self {
        Self { service, validator }
    }

    /// Returns the wrapped lifecycle service.
    #[must_use]
    pub const fn service(&self) -> &TaskLifecycleService<R, C> {
        &self.service
    }

    /// Validates and creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::ConstraintViolation`] for invalid fields
    /// and [`TaskCommandError::StoreFailure`] when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskCommandResult<TaskView> {
        let today = self.service.now().date_naive();
        let draft = self
            .validator
            .validate_create(request, today)
            .inspect_err(|violations| debug!(%violations, "create request rejected"))?;
        let task = self.service.create(draft).await?;
        Ok(TaskView::from(task))
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::InvalidIdentifier`],
    /// [`TaskCommandError::NotFound`], or [`TaskCommandError::StoreFailure`].
    pub async fn get(&self, raw_id: &str) -> TaskCommandResult<TaskView> {
        Ok(TaskView::from(self.service.get_by_id(raw_id).await?))
    }

    /// Lists every task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::StoreFailure`] when persistence fails.
    pub async fn list_all(&self) -> TaskCommandResult<Vec<TaskView>> {
        let tasks = self.service.list_all().await?;
        Ok(tasks.iter().map(TaskView::from).collect())
    }

    /// Lists tasks whose status matches `raw_status`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::InvalidStatus`] for an unknown status or
    /// [`TaskCommandError::StoreFailure`] when persistence fails.
    pub async fn list_by_status(&self, raw_status: &str) -> TaskCommandResult<Vec<TaskView>> {
        let status = TaskStatus::try_from(raw_status)?;
        let tasks = self.service.list_by_status(status).await?;
        Ok(tasks.iter().map(TaskView::from).collect())
    }

    /// Validates and applies a partial edit.
    ///
    /// Field validation runs before the identifier is decoded.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::ConstraintViolation`],
    /// [`TaskCommandError::InvalidIdentifier`], [`TaskCommandError::NotFound`],
    /// [`TaskCommandError::TaskCompleted`], [`TaskCommandError::Conflict`], or
    /// [`TaskCommandError::StoreFailure`].
    pub async fn update(
        &self,
        raw_id: &str,
        request: UpdateTaskRequest,
    ) -> TaskCommandResult<TaskView> {
        let today = self.service.now().date_naive();
        let patch = self
            .validator
            .validate_update(request, today)
            .inspect_err(|violations| debug!(%violations, "update request rejected"))?;
        Ok(TaskView::from(self.service.update(raw_id, patch).await?))
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::InvalidIdentifier`],
    /// [`TaskCommandError::NotFound`], or [`TaskCommandError::StoreFailure`].
    pub async fn delete(&self, raw_id: &str) -> TaskCommandResult<()> {
        Ok(self.service.delete(raw_id).await?)
    }

    /// Marks a task completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::InvalidIdentifier`],
    /// [`TaskCommandError::NotFound`], [`TaskCommandError::Conflict`], or
    /// [`TaskCommandError::StoreFailure`].
    pub async fn complete(&self, raw_id: &str) -> TaskCommandResult<TaskView> {
        Ok(TaskView::from(self.service.complete(raw_id).await?))
    }
}
