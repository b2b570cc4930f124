//! Task status machine.
//!
//! [`TaskStatusKind`] is the flat status used for comparisons and for the
//! transition table. [`TaskStatus`] is the stored form: one variant per
//! status, carrying only the metadata that status produces.

use super::{CaregiverName, ParseTaskStatusError, TransitionReason};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flat task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatusKind {
    /// Task has been created and is waiting to be worked.
    Pending,
    /// Task has been flagged as due by the collaborator.
    Due,
    /// A caregiver has started the task.
    InProgress,
    /// Task was carried out.
    Completed,
    /// Task was not carried out in time.
    Missed,
    /// Patient refused the task.
    Refused,
    /// Task was cancelled.
    Cancelled,
    /// Task was pushed back to a later due time.
    Deferred,
}

impl TaskStatusKind {
    /// All statuses.
    pub const ALL: [Self; 8] = [
        Self::Pending,
        Self::Due,
        Self::InProgress,
        Self::Completed,
        Self::Missed,
        Self::Refused,
        Self::Cancelled,
        Self::Deferred,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Due => "DUE",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Missed => "MISSED",
            Self::Refused => "REFUSED",
            Self::Cancelled => "CANCELLED",
            Self::Deferred => "DEFERRED",
        }
    }

    /// Returns whether the status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Missed | Self::Refused | Self::Cancelled
        )
    }

    /// Returns whether transition to `target` is allowed.
    ///
    /// This is the single transition table for the board. Deferred tasks
    /// reach it as [`TaskStatusKind::Pending`] once their due time arrives.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Pending | Self::Due,
                Self::InProgress | Self::Missed | Self::Refused | Self::Deferred
            ) | (
                Self::Pending | Self::Due | Self::InProgress,
                Self::Completed | Self::Cancelled
            )
        )
    }
}

impl fmt::Display for TaskStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatusKind {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseTaskStatusError(value.to_owned()))
    }
}

/// Stored task status with its status-specific metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Waiting to be worked.
    Pending,
    /// Flagged as due.
    Due,
    /// Started by a caregiver.
    InProgress,
    /// Carried out.
    Completed {
        /// Caregiver who completed the task.
        completed_by: CaregiverName,
        /// Completion instant.
        completed_at: DateTime<Utc>,
        /// Optional completion notes.
        completion_notes: Option<String>,
    },
    /// Not carried out in time.
    Missed {
        /// Caregiver who recorded the miss.
        missed_by: CaregiverName,
        /// Why the task was missed.
        missed_reason: TransitionReason,
    },
    /// Refused by the patient.
    Refused {
        /// Why the patient refused.
        refused_reason: TransitionReason,
    },
    /// Cancelled.
    Cancelled {
        /// Caregiver who cancelled the task.
        cancelled_by: CaregiverName,
        /// Why the task was skipped.
        skip_reason: TransitionReason,
    },
    /// Pushed back to a later due time.
    Deferred {
        /// Why the task was deferred.
        deferral_reason: TransitionReason,
    },
}

impl TaskStatus {
    /// Returns the flat status.
    #[must_use]
    pub const fn kind(&self) -> TaskStatusKind {
        match self {
            Self::Pending => TaskStatusKind::Pending,
            Self::Due => TaskStatusKind::Due,
            Self::InProgress => TaskStatusKind::InProgress,
            Self::Completed { .. } => TaskStatusKind::Completed,
            Self::Missed { .. } => TaskStatusKind::Missed,
            Self::Refused { .. } => TaskStatusKind::Refused,
            Self::Cancelled { .. } => TaskStatusKind::Cancelled,
            Self::Deferred { .. } => TaskStatusKind::Deferred,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().as_str())
    }
}
