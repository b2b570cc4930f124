//! Service layer for task creation, board loading, and lifecycle transitions.
//!
//! Transitions are validated against the caller's last-known task snapshot,
//! then submitted to the collaborator. The snapshot is never modified: a
//! successful call returns the updated copy, a failed call leaves the caller
//! to re-fetch.

use crate::task::{
    domain::{
        Admission, CaregiverName, Task, TaskBoard, TaskCategory, TaskDetails, TaskDomainError,
        TaskFilter, TaskId, TaskPriority, TaskTransition, TransitionRequest,
    },
    ports::{TaskQuery, TaskRepository, TaskRepositoryError},
    services::BoardConfig,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Message shown when the collaborator fails without an explanation.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to update task. Please try again.";

/// Request payload for creating a nursing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNursingTaskRequest {
    description: String,
    category: TaskCategory,
    priority: TaskPriority,
    due_time: Option<DateTime<Utc>>,
    assigned_nurse: Option<String>,
    admission: Option<Admission>,
    notes: Option<String>,
}

impl CreateNursingTaskRequest {
    /// Creates a request with the required description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            category: TaskCategory::default(),
            priority: TaskPriority::default(),
            due_time: None,
            assigned_nurse: None,
            admission: None,
            notes: None,
        }
    }

    /// Sets the task category.
    #[must_use]
    pub const fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets the task priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due time.
    #[must_use]
    pub const fn with_due_time(mut self, due_time: DateTime<Utc>) -> Self {
        self.due_time = Some(due_time);
        self
    }

    /// Assigns the task to a caregiver.
    #[must_use]
    pub fn with_assigned_nurse(mut self, nurse: impl Into<String>) -> Self {
        self.assigned_nurse = Some(nurse.into());
        self
    }

    /// Attaches admission context.
    #[must_use]
    pub fn with_admission(mut self, admission: Admission) -> Self {
        self.admission = Some(admission);
        self
    }

    /// Sets free-text notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Broad class of a lifecycle failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskErrorKind {
    /// Required input was missing or malformed; nothing was sent.
    Validation,
    /// The task's status does not permit the action; nothing was sent.
    InvalidTransition,
    /// The collaborator rejected the request or could not be reached.
    Transport,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskLifecycleError {
    /// Returns the broad class of the failure.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::Domain(err) if err.is_invalid_transition() => TaskErrorKind::InvalidTransition,
            Self::Domain(_) => TaskErrorKind::Validation,
            Self::Repository(_) => TaskErrorKind::Transport,
        }
    }

    /// Returns a message suitable for the person using the board.
    ///
    /// Collaborator failures surface the collaborator's own message when it
    /// supplied one and [`GENERIC_FAILURE_MESSAGE`] otherwise.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(err) => err.to_string(),
            Self::Repository(err) => err
                .collaborator_message()
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned()),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Nursing task orchestration service.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: BoardConfig,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            config: self.config,
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new service with the default board configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_config(repository, clock, BoardConfig::default())
    }

    /// Creates a new service with an explicit board configuration.
    #[must_use]
    pub const fn with_config(repository: Arc<R>, clock: Arc<C>, config: BoardConfig) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Returns the board configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Creates a pending task and stores it through the collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when input validation fails or the
    /// repository rejects persistence.
    pub async fn create_task(&self, request: CreateNursingTaskRequest) -> TaskLifecycleResult<Task> {
        let mut details = TaskDetails::new(request.description)?
            .with_category(request.category)
            .with_priority(request.priority);
        if let Some(due_time) = request.due_time {
            details = details.with_due_time(due_time);
        }
        if let Some(nurse) = request.assigned_nurse {
            details = details.with_assigned_nurse(CaregiverName::new(nurse)?);
        }
        if let Some(admission) = request.admission {
            details = details.with_admission(admission);
        }
        if let Some(notes) = request.notes {
            details = details.with_notes(notes);
        }

        let task = Task::new(details, &*self.clock);
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), priority = %task.priority(), "nursing task created");
        Ok(task)
    }

    /// Lists tasks through the collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the fetch fails.
    pub async fn list_tasks(&self, query: &TaskQuery) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list(query).await?)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Fetches tasks and classifies them at the service clock's current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the fetch fails.
    pub async fn load_board(
        &self,
        query: &TaskQuery,
        filter: &TaskFilter,
    ) -> TaskLifecycleResult<TaskBoard> {
        let tasks = self.list_tasks(query).await?;
        let now = self.clock.utc();
        Ok(self.config.classifier().classify(&tasks, filter, now))
    }

    /// Starts work on a pending or due task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] for a blank caregiver, a status that
    /// cannot be started, or a collaborator failure.
    pub async fn start(
        &self,
        task: &Task,
        performed_by: impl Into<String>,
    ) -> TaskLifecycleResult<Task> {
        self.transition(task, performed_by.into(), Ok(TaskTransition::Start))
            .await
    }

    /// Completes a task, stamping the completing caregiver and time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] for a blank caregiver, a status that
    /// cannot be completed, or a collaborator failure.
    pub async fn complete(
        &self,
        task: &Task,
        performed_by: impl Into<String>,
        notes: Option<String>,
    ) -> TaskLifecycleResult<Task> {
        self.transition(task, performed_by.into(), Ok(TaskTransition::complete(notes)))
            .await
    }

    /// Records a task as missed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] for a blank caregiver or reason, a
    /// status that cannot be missed, or a collaborator failure.
    pub async fn mark_missed(
        &self,
        task: &Task,
        performed_by: impl Into<String>,
        reason: impl Into<String>,
    ) -> TaskLifecycleResult<Task> {
        self.transition(task, performed_by.into(), TaskTransition::mark_missed(reason))
            .await
    }

    /// Records that the patient refused a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] for a blank caregiver or reason, a
    /// status that cannot be refused, or a collaborator failure.
    pub async fn mark_refused(
        &self,
        task: &Task,
        performed_by: impl Into<String>,
        reason: impl Into<String>,
    ) -> TaskLifecycleResult<Task> {
        self.transition(task, performed_by.into(), TaskTransition::mark_refused(reason))
            .await
    }

    /// Defers a task to a later due time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] for a blank caregiver or reason, a due
    /// time not after now, a status that cannot be deferred, or a
    /// collaborator failure.
    pub async fn defer(
        &self,
        task: &Task,
        performed_by: impl Into<String>,
        new_due_time: DateTime<Utc>,
        reason: impl Into<String>,
    ) -> TaskLifecycleResult<Task> {
        self.transition(
            task,
            performed_by.into(),
            TaskTransition::defer(new_due_time, reason),
        )
        .await
    }

    /// Cancels a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] for a blank caregiver or reason, a
    /// status that cannot be cancelled, or a collaborator failure.
    pub async fn cancel(
        &self,
        task: &Task,
        performed_by: impl Into<String>,
        reason: impl Into<String>,
    ) -> TaskLifecycleResult<Task> {
        self.transition(task, performed_by.into(), TaskTransition::cancel(reason))
            .await
    }

    /// Validates locally, then submits the transition to the collaborator.
    async fn transition(
        &self,
        task: &Task,
        performed_by: String,
        built: Result<TaskTransition, TaskDomainError>,
    ) -> TaskLifecycleResult<Task> {
        let transition = built?;
        let caregiver = CaregiverName::new(performed_by)?;
        let now = self.clock.utc();
        let from = task.effective_status(now);

        let mut updated = task.clone();
        updated.apply_transition_at(&transition, &caregiver, now)?;

        let request = TransitionRequest {
            task_id: task.id(),
            transition,
            performed_by: caregiver,
            requested_at: now,
        };
        if let Err(err) = self.repository.submit(&request).await {
            warn!(
                task_id = %task.id(),
                action = request.transition.action(),
                error = %err,
                "task transition rejected by collaborator"
            );
            return Err(err.into());
        }

        info!(
            task_id = %task.id(),
            action = request.transition.action(),
            from = %from,
            to = %updated.status_kind(),
            "task transition accepted"
        );
        Ok(updated)
    }
}
