//! In-memory integration tests for task lifecycle operations.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use wardboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskCategory, TaskFilter, TaskPriority, TaskStatus, TaskStatusKind},
    ports::{TaskQuery, TaskRepository, TaskRepositoryError},
    services::{CreateNursingTaskRequest, TaskErrorKind, TaskLifecycleError, TaskLifecycleService},
};

type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

#[fixture]
fn repository() -> Arc<InMemoryTaskRepository> {
    Arc::new(InMemoryTaskRepository::new())
}

fn service_over(repository: &Arc<InMemoryTaskRepository>) -> TestService {
    TaskLifecycleService::new(Arc::clone(repository), Arc::new(DefaultClock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_shift_workflow_is_persisted(
    repository: Arc<InMemoryTaskRepository>,
) -> Result<(), eyre::Report> {
    let service = service_over(&repository);
    let created = service
        .create_task(
            CreateNursingTaskRequest::new("Administer IV antibiotics")
                .with_category(TaskCategory::Medication)
                .with_priority(TaskPriority::High)
                .with_due_time(Utc::now() + TimeDelta::minutes(20))
                .with_assigned_nurse("Nurse Okafor"),
        )
        .await?;

    let started = service.start(&created, "Nurse Okafor").await?;
    let completed = service
        .complete(&started, "Nurse Okafor", Some("given via left cannula".to_owned()))
        .await?;

    let stored = repository
        .find_by_id(created.id())
        .await?
        .ok_or_else(|| eyre::eyre!("stored task missing"))?;
    eyre::ensure!(stored.status_kind() == TaskStatusKind::Completed);
    eyre::ensure!(stored.completion_notes() == Some("given via left cannula"));
    eyre::ensure!(stored == completed, "collaborator copy diverged from result");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_store_is_rejected(
    repository: Arc<InMemoryTaskRepository>,
) -> Result<(), eyre::Report> {
    let service = service_over(&repository);
    let created = service
        .create_task(CreateNursingTaskRequest::new("Falls risk assessment"))
        .await?;

    let result = repository.store(&created).await;

    eyre::ensure!(
        matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == created.id()),
        "expected duplicate rejection, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deferral_moves_due_time_and_hides_until_then(
    repository: Arc<InMemoryTaskRepository>,
) -> Result<(), eyre::Report> {
    let service = service_over(&repository);
    let created = service
        .create_task(CreateNursingTaskRequest::new("Chest physiotherapy"))
        .await?;
    let new_due = Utc::now() + TimeDelta::hours(2);

    let deferred = service
        .defer(&created, "Nurse Okafor", new_due, "patient in radiology")
        .await?;

    eyre::ensure!(deferred.due_time() == Some(new_due));
    eyre::ensure!(matches!(deferred.status(), TaskStatus::Deferred { .. }));
    let board = service
        .load_board(&TaskQuery::all(), &TaskFilter::new())
        .await?;
    eyre::ensure!(board.buckets_of(created.id()).is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_caregivers_cannot_both_close_a_task(
    repository: Arc<InMemoryTaskRepository>,
) -> Result<(), eyre::Report> {
    let service = service_over(&repository);
    let created = service
        .create_task(CreateNursingTaskRequest::new("Pre-op fasting check"))
        .await?;

    service
        .mark_missed(&created, "Nurse Okafor", "patient off ward")
        .await?;
    let second = service
        .mark_refused(&created, "Nurse Adeyemi", "patient declined")
        .await;

    let Err(err) = second else {
        eyre::bail!("second close should be rejected");
    };
    eyre::ensure!(err.kind() == TaskErrorKind::Transport);
    eyre::ensure!(matches!(
        err,
        TaskLifecycleError::Repository(TaskRepositoryError::Rejected(_))
    ));
    let stored = repository
        .find_by_id(created.id())
        .await?
        .ok_or_else(|| eyre::eyre!("stored task missing"))?;
    eyre::ensure!(stored.status_kind() == TaskStatusKind::Missed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transition_for_unknown_task_reports_not_found(
    repository: Arc<InMemoryTaskRepository>,
) -> Result<(), eyre::Report> {
    let service = service_over(&repository);
    let orphan = service_over(&Arc::new(InMemoryTaskRepository::new()))
        .create_task(CreateNursingTaskRequest::new("Orphaned task"))
        .await?;

    let result = service.start(&orphan, "Nurse Okafor").await;

    eyre::ensure!(matches!(
        result,
        Err(TaskLifecycleError::Repository(TaskRepositoryError::NotFound(id))) if id == orphan.id()
    ));
    Ok(())
}
