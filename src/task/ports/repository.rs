//! Repository port for the task-persistence collaborator.

use crate::task::domain::{CaregiverName, Task, TaskId, TransitionRequest};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Narrowing applied by the collaborator when listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Only return tasks assigned to this caregiver.
    pub assigned_nurse: Option<CaregiverName>,
}

impl TaskQuery {
    /// Lists every task.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Lists tasks assigned to `nurse`.
    #[must_use]
    pub const fn for_nurse(nurse: CaregiverName) -> Self {
        Self {
            assigned_nurse: Some(nurse),
        }
    }

    /// Returns whether `task` satisfies the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.assigned_nurse
            .as_ref()
            .is_none_or(|nurse| task.assigned_nurse() == Some(nurse))
    }
}

/// Task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns the current task list narrowed by `query`.
    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>>;

    /// Stores a newly created task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Submits a validated lifecycle transition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::Rejected`] when the collaborator refuses the
    /// transition against its own state.
    async fn submit(&self, request: &TransitionRequest) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The collaborator refused the request with a message.
    #[error("{0}")]
    Rejected(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the collaborator-supplied message, when one exists.
    #[must_use]
    pub fn collaborator_message(&self) -> Option<String> {
        match self {
            Self::Rejected(message) => {
                let trimmed = message.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            }
            Self::DuplicateTask(_) | Self::NotFound(_) => Some(self.to_string()),
            Self::Persistence(_) => None,
        }
    }
}
