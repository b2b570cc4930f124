//! Lifecycle transitions and the mutation requests sent to the collaborator.

use super::{CaregiverName, TaskDomainError, TaskId, TaskStatusKind, TransitionReason};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A caller-initiated status change with its validated payload.
///
/// Constructors reject blank reasons, so a value of this type only ever
/// fails later on timing or on the transition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TaskTransition {
    /// Begin work on the task.
    Start,
    /// Record the task as carried out.
    Complete {
        /// Optional completion notes.
        notes: Option<String>,
    },
    /// Record the task as missed.
    MarkMissed {
        /// Why the task was missed.
        reason: TransitionReason,
    },
    /// Record that the patient refused the task.
    MarkRefused {
        /// Why the patient refused.
        reason: TransitionReason,
    },
    /// Push the task back to a later due time.
    Defer {
        /// Replacement due time, strictly in the future.
        new_due_time: DateTime<Utc>,
        /// Why the task was deferred.
        reason: TransitionReason,
    },
    /// Cancel the task.
    Cancel {
        /// Why the task was skipped.
        reason: TransitionReason,
    },
}

impl TaskTransition {
    /// Creates a completion with optional notes; blank notes are dropped.
    #[must_use]
    pub fn complete(notes: Option<String>) -> Self {
        let kept = notes
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());
        Self::Complete { notes: kept }
    }

    /// Creates a missed transition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyReason`] when `reason` is blank.
    pub fn mark_missed(reason: impl Into<String>) -> Result<Self, TaskDomainError> {
        let validated = TransitionReason::new(reason, "mark missed")?;
        Ok(Self::MarkMissed { reason: validated })
    }

    /// Creates a refused transition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyReason`] when `reason` is blank.
    pub fn mark_refused(reason: impl Into<String>) -> Result<Self, TaskDomainError> {
        let validated = TransitionReason::new(reason, "mark refused")?;
        Ok(Self::MarkRefused { reason: validated })
    }

    /// Creates a deferral.
    ///
    /// The due time is checked against the clock when the transition is
    /// applied, not here.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyReason`] when `reason` is blank.
    pub fn defer(
        new_due_time: DateTime<Utc>,
        reason: impl Into<String>,
    ) -> Result<Self, TaskDomainError> {
        let validated = TransitionReason::new(reason, "defer")?;
        Ok(Self::Defer {
            new_due_time,
            reason: validated,
        })
    }

    /// Creates a cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyReason`] when `reason` is blank.
    pub fn cancel(reason: impl Into<String>) -> Result<Self, TaskDomainError> {
        let validated = TransitionReason::new(reason, "cancel")?;
        Ok(Self::Cancel { reason: validated })
    }

    /// Returns the status this transition moves a task into.
    #[must_use]
    pub const fn target(&self) -> TaskStatusKind {
        match self {
            Self::Start => TaskStatusKind::InProgress,
            Self::Complete { .. } => TaskStatusKind::Completed,
            Self::MarkMissed { .. } => TaskStatusKind::Missed,
            Self::MarkRefused { .. } => TaskStatusKind::Refused,
            Self::Defer { .. } => TaskStatusKind::Deferred,
            Self::Cancel { .. } => TaskStatusKind::Cancelled,
        }
    }

    /// Returns the action name used in logs and wire payloads.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Complete { .. } => "complete",
            Self::MarkMissed { .. } => "mark_missed",
            Self::MarkRefused { .. } => "mark_refused",
            Self::Defer { .. } => "defer",
            Self::Cancel { .. } => "cancel",
        }
    }
}

/// Mutation request handed to the task-persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// Task being transitioned.
    pub task_id: TaskId,
    /// Validated transition payload.
    pub transition: TaskTransition,
    /// Caregiver performing the transition.
    pub performed_by: CaregiverName,
    /// Instant the transition was validated at.
    pub requested_at: DateTime<Utc>,
}
