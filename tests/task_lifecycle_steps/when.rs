//! When steps for nursing task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use chrono::{TimeDelta, Utc};
use rstest_bdd_macros::when;

#[when(r#""{caregiver}" starts the task"#)]
fn start_task(world: &mut TaskLifecycleWorld, caregiver: String) -> Result<(), eyre::Report> {
    let task = world.task()?.clone();
    let result = run_async(world.service.start(&task, caregiver));
    world.record(result);
    Ok(())
}

#[when(r#""{caregiver}" completes the task with notes "{notes}""#)]
fn complete_task(
    world: &mut TaskLifecycleWorld,
    caregiver: String,
    notes: String,
) -> Result<(), eyre::Report> {
    let task = world.task()?.clone();
    let result = run_async(world.service.complete(&task, caregiver, Some(notes)));
    world.record(result);
    Ok(())
}

#[when(r#""{caregiver}" marks the task missed without a reason"#)]
fn mark_missed_without_reason(
    world: &mut TaskLifecycleWorld,
    caregiver: String,
) -> Result<(), eyre::Report> {
    let task = world.task()?.clone();
    let result = run_async(world.service.mark_missed(&task, caregiver, ""));
    world.record(result);
    Ok(())
}

#[when(r#""{caregiver}" defers the task to {minutes:i64} minutes ago because "{reason}""#)]
fn defer_into_past(
    world: &mut TaskLifecycleWorld,
    caregiver: String,
    minutes: i64,
    reason: String,
) -> Result<(), eyre::Report> {
    let task = world.task()?.clone();
    let new_due = Utc::now() - TimeDelta::minutes(minutes);
    let result = run_async(world.service.defer(&task, caregiver, new_due, reason));
    world.record(result);
    Ok(())
}

#[when(r#""{caregiver}" defers the task to {minutes:i64} minutes from now because "{reason}""#)]
fn defer_into_future(
    world: &mut TaskLifecycleWorld,
    caregiver: String,
    minutes: i64,
    reason: String,
) -> Result<(), eyre::Report> {
    let task = world.task()?.clone();
    let new_due = Utc::now() + TimeDelta::minutes(minutes);
    let result = run_async(world.service.defer(&task, caregiver, new_due, reason));
    world.record(result);
    Ok(())
}
