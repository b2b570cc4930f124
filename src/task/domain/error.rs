//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatusKind};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing domain task values or applying
/// lifecycle transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The caregiver identity is empty after trimming.
    #[error("caregiver name must not be empty")]
    EmptyCaregiverName,

    /// A transition that requires a reason was given blank text.
    #[error("a reason is required to {action} a task")]
    EmptyReason {
        /// Transition action that rejected the reason.
        action: &'static str,
    },

    /// The requested deferral time is not strictly after the current time.
    #[error("deferred due time {requested} must be after {now}")]
    DeferralNotInFuture {
        /// Requested new due time.
        requested: DateTime<Utc>,
        /// Instant the request was validated against.
        now: DateTime<Utc>,
    },

    /// The transition between two statuses is not permitted.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidStateTransition {
        /// Task being transitioned.
        task_id: TaskId,
        /// Current effective status.
        from: TaskStatusKind,
        /// Requested target status.
        to: TaskStatusKind,
    },
}

impl TaskDomainError {
    /// Returns whether the error is a rejected status transition rather than
    /// a payload validation failure.
    #[must_use]
    pub const fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidStateTransition { .. })
    }
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing task categories.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task category: {0}")]
pub struct ParseTaskCategoryError(pub String);
