//! In-memory integration tests for task lifecycle operations.

use super::helpers::{DESCRIPTION, Stack, TITLE, stack, valid_request};
use chrono::{NaiveDate, TimeDelta};
use rstest::rstest;
use tasklane::task::{
    commands::{TaskCommandError, UpdateTaskRequest},
    domain::{TaskId, TaskStatus},
    ports::TaskRepository,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_listed_and_fetchable(stack: Stack) -> eyre::Result<()> {
    let created = stack.handler.create(valid_request()).await?;

    let fetched = stack.handler.get(&created.id).await?;
    let listed = stack.handler.list_all().await?;
    let pending = stack.handler.list_by_status("PENDING").await?;

    eyre::ensure!(fetched == created, "fetched view differs from created view");
    eyre::ensure!(listed == vec![created.clone()], "unexpected listing {listed:?}");
    eyre::ensure!(pending == vec![created], "unexpected pending listing");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn partial_update_keeps_other_fields(stack: Stack) -> eyre::Result<()> {
    let created = stack.handler.create(valid_request()).await?;
    let new_due = NaiveDate::from_ymd_opt(2025, 10, 1).ok_or_else(|| eyre::eyre!("bad date"))?;

    let updated = stack
        .handler
        .update(&created.id, UpdateTaskRequest::new().with_due_date(new_due))
        .await?;

    eyre::ensure!(updated.title == TITLE);
    eyre::ensure!(updated.description == DESCRIPTION);
    eyre::ensure!(updated.due_date == new_due);
    eyre::ensure!(updated.status == TaskStatus::Pending);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_reaches_completed(stack: Stack) -> eyre::Result<()> {
    let created = stack.handler.create(valid_request()).await?;
    stack.clock.advance(TimeDelta::minutes(5));

    let report = stack.service().sweep_now().await?;
    let in_progress = stack.handler.get(&created.id).await?;
    let completed = stack.handler.complete(&created.id).await?;

    eyre::ensure!(report.started().len() == 1);
    eyre::ensure!(in_progress.status == TaskStatus::InProgress);
    eyre::ensure!(completed.status == TaskStatus::Completed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_rejects_edits_but_accepts_recompletion(stack: Stack) -> eyre::Result<()> {
    let created = stack.handler.create(valid_request()).await?;
    stack.handler.complete(&created.id).await?;

    let edit = stack
        .handler
        .update(&created.id, UpdateTaskRequest::new().with_title("Revised onboarding guide"))
        .await;
    let again = stack.handler.complete(&created.id).await?;

    eyre::ensure!(
        matches!(edit, Err(TaskCommandError::TaskCompleted(_))),
        "expected TaskCompleted, got {edit:?}"
    );
    eyre::ensure!(again.status == TaskStatus::Completed);
    eyre::ensure!(again.title == TITLE);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_disappears_from_store(stack: Stack) -> eyre::Result<()> {
    let created = stack.handler.create(valid_request()).await?;
    let task_id = TaskId::decode(&created.id)?;

    stack.handler.delete(&created.id).await?;

    eyre::ensure!(stack.repository.find_by_id(task_id).await?.is_none());
    eyre::ensure!(stack.repository.is_empty()?);
    let second_delete = stack.handler.delete(&created.id).await;
    eyre::ensure!(matches!(second_delete, Err(TaskCommandError::NotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_does_not_reset_pending_age(stack: Stack) -> eyre::Result<()> {
    let created = stack.handler.create(valid_request()).await?;
    stack.clock.advance(TimeDelta::minutes(4));
    stack
        .handler
        .update(&created.id, UpdateTaskRequest::new().with_title("Onboarding guide v2"))
        .await?;
    stack.clock.advance(TimeDelta::minutes(1));

    let report = stack.service().sweep_now().await?;

    eyre::ensure!(report.started().len() == 1, "edit must not delay the start");
    Ok(())
}
