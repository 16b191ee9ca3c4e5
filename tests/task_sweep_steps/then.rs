//! Then steps for task sweep BDD scenarios.

use super::world::{TaskSweepWorld, run_async};
use rstest_bdd_macros::then;
use tasklane::task::{commands::TaskCommandError, domain::TaskStatus};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskSweepWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.current_task()?.id.clone();
    let stored = run_async(world.handler.get(&task_id))?;

    if stored.status != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            stored.status
        ));
    }
    Ok(())
}

#[then("the sweep started {count:usize} tasks")]
fn sweep_started(world: &TaskSweepWorld, count: usize) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing sweep report"))?;

    if report.started().len() != count {
        return Err(eyre::eyre!(
            "expected {count} started tasks, found {}",
            report.started().len()
        ));
    }
    Ok(())
}

#[then("the edit is rejected because the task is completed")]
fn edit_rejected(world: &TaskSweepWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_edit
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing edit result"))?;

    if !matches!(result, Err(TaskCommandError::TaskCompleted(_))) {
        return Err(eyre::eyre!("expected TaskCompleted error, got {result:?}"));
    }
    Ok(())
}
