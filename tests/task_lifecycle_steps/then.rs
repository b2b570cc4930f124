//! Then steps for nursing task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use rstest_bdd_macros::then;
use wardboard::task::{
    domain::{TaskFilter, TaskStatusKind},
    ports::TaskQuery,
    services::{TaskErrorKind, TaskLifecycleError},
};

fn failed_transition(world: &TaskLifecycleWorld) -> Result<&TaskLifecycleError, eyre::Report> {
    match world.last_transition_result.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(task)) => Err(eyre::eyre!(
            "expected the transition to fail, but task is now {}",
            task.status_kind()
        )),
        None => Err(eyre::eyre!("missing transition result")),
    }
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatusKind::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let actual = world.task()?.status_kind();

    eyre::ensure!(actual == expected, "expected status {expected}, found {actual}");
    Ok(())
}

#[then(r#"the task was completed by "{caregiver}""#)]
fn task_completed_by(world: &TaskLifecycleWorld, caregiver: String) -> Result<(), eyre::Report> {
    let task = world.task()?;
    let completed_by = task
        .completed_by()
        .ok_or_else(|| eyre::eyre!("task has no completing caregiver"))?;

    eyre::ensure!(
        completed_by.as_str() == caregiver,
        "expected completion by {caregiver}, found {completed_by}"
    );
    eyre::ensure!(task.completed_at().is_some(), "completion time missing");
    Ok(())
}

#[then("the transition fails validation")]
fn transition_fails_validation(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let err = failed_transition(world)?;
    eyre::ensure!(
        err.kind() == TaskErrorKind::Validation,
        "expected a validation failure, got {err:?}"
    );
    Ok(())
}

#[then("the transition fails as invalid for the current status")]
fn transition_fails_as_invalid(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let err = failed_transition(world)?;
    eyre::ensure!(
        err.kind() == TaskErrorKind::InvalidTransition,
        "expected an invalid transition failure, got {err:?}"
    );
    Ok(())
}

#[then("the transition is rejected by the collaborator")]
fn transition_rejected_by_collaborator(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let err = failed_transition(world)?;
    eyre::ensure!(
        err.kind() == TaskErrorKind::Transport,
        "expected a collaborator rejection, got {err:?}"
    );
    eyre::ensure!(
        !err.user_message().is_empty(),
        "collaborator rejection should carry a message"
    );
    Ok(())
}

#[then(r#"the task appears in buckets "{buckets}""#)]
fn task_appears_in_buckets(world: &TaskLifecycleWorld, buckets: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let board = run_async(
        world
            .service
            .load_board(&TaskQuery::all(), &TaskFilter::new()),
    )?;
    let actual: Vec<&str> = board
        .buckets_of(task_id)
        .into_iter()
        .map(|bucket| bucket.as_str())
        .collect();
    let expected: Vec<&str> = buckets.split(',').map(str::trim).collect();

    eyre::ensure!(actual == expected, "expected buckets {expected:?}, found {actual:?}");
    Ok(())
}

#[then("the task is not on the board")]
fn task_not_on_board(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let board = run_async(
        world
            .service
            .load_board(&TaskQuery::all(), &TaskFilter::new()),
    )?;

    eyre::ensure!(
        board.buckets_of(task_id).is_empty(),
        "deferred task should be hidden, found in {:?}",
        board.buckets_of(task_id)
    );
    Ok(())
}
