//! Task aggregate root and lifecycle transitions.

use super::{
    Admission, CaregiverName, TaskCategory, TaskDomainError, TaskId, TaskPriority, TaskStatus,
    TaskStatusKind, TaskTransition,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated details supplied when a task is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    description: String,
    category: TaskCategory,
    priority: TaskPriority,
    due_time: Option<DateTime<Utc>>,
    assigned_nurse: Option<CaregiverName>,
    admission: Option<Admission>,
    notes: Option<String>,
}

impl TaskDetails {
    /// Creates task details with the required description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDescription`] when the description is
    /// blank.
    pub fn new(description: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = description.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyDescription);
        }
        Ok(Self {
            description: trimmed.to_owned(),
            category: TaskCategory::default(),
            priority: TaskPriority::default(),
            due_time: None,
            assigned_nurse: None,
            admission: None,
            notes: None,
        })
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
    pub fn with_assigned_nurse(mut self, nurse: CaregiverName) -> Self {
        self.assigned_nurse = Some(nurse);
        self
    }

    /// Attaches admission context.
    #[must_use]
    pub fn with_admission(mut self, admission: Admission) -> Self {
        self.admission = Some(admission);
        self
    }

    /// Sets free-text notes; blank notes are ignored.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let text = notes.into();
        let trimmed = text.trim();
        self.notes = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }
}

/// Nursing task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    description: String,
    category: TaskCategory,
    priority: TaskPriority,
    #[serde(flatten)]
    status: TaskStatus,
    due_time: Option<DateTime<Utc>>,
    assigned_nurse: Option<CaregiverName>,
    admission: Option<Admission>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted description.
    pub description: String,
    /// Persisted category.
    pub category: TaskCategory,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted status and its metadata.
    pub status: TaskStatus,
    /// Persisted due time, if any.
    pub due_time: Option<DateTime<Utc>>,
    /// Persisted assignee, if any.
    pub assigned_nurse: Option<CaregiverName>,
    /// Persisted admission context, if any.
    pub admission: Option<Admission>,
    /// Persisted notes, if any.
    pub notes: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task.
    #[must_use]
    pub fn new(details: TaskDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            description: details.description,
            category: details.category,
            priority: details.priority,
            status: TaskStatus::Pending,
            due_time: details.due_time,
            assigned_nurse: details.assigned_nurse,
            admission: details.admission,
            notes: details.notes,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            description: data.description,
            category: data.category,
            priority: data.priority,
            status: data.status,
            due_time: data.due_time,
            assigned_nurse: data.assigned_nurse,
            admission: data.admission,
            notes: data.notes,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task category.
    #[must_use]
    pub const fn category(&self) -> TaskCategory {
        self.category
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the stored status with its metadata.
    #[must_use]
    pub const fn status(&self) -> &TaskStatus {
        &self.status
    }

    /// Returns the stored flat status.
    #[must_use]
    pub const fn status_kind(&self) -> TaskStatusKind {
        self.status.kind()
    }

    /// Returns the status the board treats the task as having at `now`.
    ///
    /// A deferred task becomes pending again once its new due time arrives.
    #[must_use]
    pub fn effective_status(&self, now: DateTime<Utc>) -> TaskStatusKind {
        match (self.status.kind(), self.due_time) {
            (TaskStatusKind::Deferred, Some(due)) if due <= now => TaskStatusKind::Pending,
            (kind, _) => kind,
        }
    }

    /// Returns the due time, if any.
    #[must_use]
    pub const fn due_time(&self) -> Option<DateTime<Utc>> {
        self.due_time
    }

    /// Returns the assigned caregiver, if any.
    #[must_use]
    pub const fn assigned_nurse(&self) -> Option<&CaregiverName> {
        self.assigned_nurse.as_ref()
    }

    /// Returns the admission context, if any.
    #[must_use]
    pub const fn admission(&self) -> Option<&Admission> {
        self.admission.as_ref()
    }

    /// Returns the notes recorded at creation, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the completion notes when the task is completed.
    #[must_use]
    pub fn completion_notes(&self) -> Option<&str> {
        match &self.status {
            TaskStatus::Completed {
                completion_notes, ..
            } => completion_notes.as_deref(),
            _ => None,
        }
    }

    /// Returns who completed the task, when completed.
    #[must_use]
    pub const fn completed_by(&self) -> Option<&CaregiverName> {
        match &self.status {
            TaskStatus::Completed { completed_by, .. } => Some(completed_by),
            _ => None,
        }
    }

    /// Returns when the task was completed, when completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        match &self.status {
            TaskStatus::Completed { completed_at, .. } => Some(*completed_at),
            _ => None,
        }
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a lifecycle transition at the clock's current time.
    ///
    /// # Errors
    ///
    /// See [`Task::apply_transition_at`].
    pub fn apply_transition(
        &mut self,
        transition: &TaskTransition,
        performed_by: &CaregiverName,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.apply_transition_at(transition, performed_by, clock.utc())
    }

    /// Applies a lifecycle transition as of `now`.
    ///
    /// The task is left untouched when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DeferralNotInFuture`] when a deferral does
    /// not move the due time strictly past `now`, or
    /// [`TaskDomainError::InvalidStateTransition`] when the effective status
    /// does not permit the transition.
    pub fn apply_transition_at(
        &mut self,
        transition: &TaskTransition,
        performed_by: &CaregiverName,
        now: DateTime<Utc>,
    ) -> Result<(), TaskDomainError> {
        if let TaskTransition::Defer { new_due_time, .. } = transition {
            if *new_due_time <= now {
                return Err(TaskDomainError::DeferralNotInFuture {
                    requested: *new_due_time,
                    now,
                });
            }
        }

        let from = self.effective_status(now);
        let to = transition.target();
        if !from.can_transition_to(to) {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from,
                to,
            });
        }

        self.status = match transition {
            TaskTransition::Start => TaskStatus::InProgress,
            TaskTransition::Complete { notes } => TaskStatus::Completed {
                completed_by: performed_by.clone(),
                completed_at: now,
                completion_notes: notes.clone(),
            },
            TaskTransition::MarkMissed { reason } => TaskStatus::Missed {
                missed_by: performed_by.clone(),
                missed_reason: reason.clone(),
            },
            TaskTransition::MarkRefused { reason } => TaskStatus::Refused {
                refused_reason: reason.clone(),
            },
            TaskTransition::Defer {
                new_due_time,
                reason,
            } => {
                self.due_time = Some(*new_due_time);
                TaskStatus::Deferred {
                    deferral_reason: reason.clone(),
                }
            }
            TaskTransition::Cancel { reason } => TaskStatus::Cancelled {
                cancelled_by: performed_by.clone(),
                skip_reason: reason.clone(),
            },
        };
        self.updated_at = now;
        Ok(())
    }
}
