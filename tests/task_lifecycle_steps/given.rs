//! Given steps for nursing task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use chrono::{TimeDelta, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use wardboard::task::{
    domain::{PersistedTaskData, Task, TaskCategory, TaskId, TaskPriority, TaskStatus},
    ports::TaskRepository,
    services::CreateNursingTaskRequest,
};

#[given(r#"a pending task "{description}""#)]
fn pending_task(world: &mut TaskLifecycleWorld, description: String) -> Result<(), eyre::Report> {
    let created = run_async(
        world
            .service
            .create_task(CreateNursingTaskRequest::new(description)),
    )
    .wrap_err("create pending task for scenario")?;
    world.current_task = Some(created);
    Ok(())
}

#[given(r#"a due task "{description}" that was due {minutes:i64} minutes ago"#)]
fn late_due_task(
    world: &mut TaskLifecycleWorld,
    description: String,
    minutes: i64,
) -> Result<(), eyre::Report> {
    let now = Utc::now();
    let task = Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        description,
        category: TaskCategory::Medication,
        priority: TaskPriority::Urgent,
        status: TaskStatus::Due,
        due_time: Some(now - TimeDelta::minutes(minutes)),
        assigned_nurse: None,
        admission: None,
        notes: None,
        created_at: now - TimeDelta::hours(4),
        updated_at: now - TimeDelta::hours(4),
    });
    run_async(world.repository.store(&task)).wrap_err("seed due task for scenario")?;
    world.current_task = Some(task);
    Ok(())
}

#[given(r#"the task has been completed by "{caregiver}""#)]
fn task_has_been_completed(
    world: &mut TaskLifecycleWorld,
    caregiver: String,
) -> Result<(), eyre::Report> {
    let task = world.task()?.clone();
    let completed = run_async(world.service.complete(&task, caregiver, None))
        .wrap_err("complete task in scenario setup")?;
    world.current_task = Some(completed);
    Ok(())
}

#[given(r#""{caregiver}" has already cancelled the task because "{reason}""#)]
fn task_cancelled_elsewhere(
    world: &mut TaskLifecycleWorld,
    caregiver: String,
    reason: String,
) -> Result<(), eyre::Report> {
    let task = world.task()?.clone();
    run_async(world.service.cancel(&task, caregiver, reason))
        .wrap_err("cancel task from another board")?;
    Ok(())
}
