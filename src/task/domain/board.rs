//! Task classifier: derives the five board buckets from a task snapshot.
//!
//! Each bucket predicate is evaluated independently, so boundary due times
//! can place one task in two buckets (for example a `DUE` task whose due time
//! has passed is both Due and Overdue). Missed, refused, cancelled, and
//! not-yet-due deferred tasks land in no bucket.

use super::{Task, TaskFilter, TaskId, TaskStatusKind};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Default width of the due-soon window, in hours.
pub const DEFAULT_DUE_SOON_WINDOW_HOURS: i64 = 2;

/// Board display bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskBucket {
    /// Pending with no deadline or a deadline beyond the due-soon window.
    Pending,
    /// Due now or within the due-soon window.
    Due,
    /// Past its deadline without being started.
    Overdue,
    /// Started.
    InProgress,
    /// Completed.
    Completed,
}

impl TaskBucket {
    /// All buckets in board display order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Due,
        Self::Overdue,
        Self::InProgress,
        Self::Completed,
    ];

    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Due => "due",
            Self::Overdue => "overdue",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-bucket task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    /// Tasks in the Pending bucket.
    pub pending: usize,
    /// Tasks in the Due bucket.
    pub due: usize,
    /// Tasks in the Overdue bucket.
    pub overdue: usize,
    /// Tasks in the In Progress bucket.
    pub in_progress: usize,
    /// Tasks in the Completed bucket.
    pub completed: usize,
}

/// Classified board for one snapshot of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBoard {
    generated_at: DateTime<Utc>,
    pending: Vec<Task>,
    due: Vec<Task>,
    overdue: Vec<Task>,
    in_progress: Vec<Task>,
    completed: Vec<Task>,
}

impl TaskBoard {
    fn empty(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            pending: Vec::new(),
            due: Vec::new(),
            overdue: Vec::new(),
            in_progress: Vec::new(),
            completed: Vec::new(),
        }
    }

    /// Returns the instant the board was classified at.
    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Returns the tasks in `bucket`, in display order.
    #[must_use]
    pub fn bucket(&self, bucket: TaskBucket) -> &[Task] {
        match bucket {
            TaskBucket::Pending => &self.pending,
            TaskBucket::Due => &self.due,
            TaskBucket::Overdue => &self.overdue,
            TaskBucket::InProgress => &self.in_progress,
            TaskBucket::Completed => &self.completed,
        }
    }

    /// Returns every bucket containing the task with `id`.
    #[must_use]
    pub fn buckets_of(&self, id: TaskId) -> Vec<TaskBucket> {
        TaskBucket::ALL
            .into_iter()
            .filter(|bucket| self.bucket(*bucket).iter().any(|task| task.id() == id))
            .collect()
    }

    /// Returns per-bucket counts.
    #[must_use]
    pub fn summary(&self) -> BoardSummary {
        BoardSummary {
            pending: self.pending.len(),
            due: self.due.len(),
            overdue: self.overdue.len(),
            in_progress: self.in_progress.len(),
            completed: self.completed.len(),
        }
    }

    fn bucket_mut(&mut self, bucket: TaskBucket) -> &mut Vec<Task> {
        match bucket {
            TaskBucket::Pending => &mut self.pending,
            TaskBucket::Due => &mut self.due,
            TaskBucket::Overdue => &mut self.overdue,
            TaskBucket::InProgress => &mut self.in_progress,
            TaskBucket::Completed => &mut self.completed,
        }
    }
}

/// Pure classifier parameterised by the due-soon window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskClassifier {
    due_soon_window: TimeDelta,
}

impl Default for TaskClassifier {
    fn default() -> Self {
        Self::new(TimeDelta::hours(DEFAULT_DUE_SOON_WINDOW_HOURS))
    }
}

impl TaskClassifier {
    /// Creates a classifier with the given due-soon window.
    ///
    /// A negative window is clamped to zero.
    #[must_use]
    pub fn new(due_soon_window: TimeDelta) -> Self {
        Self {
            due_soon_window: due_soon_window.max(TimeDelta::zero()),
        }
    }

    /// Returns the due-soon window.
    #[must_use]
    pub const fn due_soon_window(&self) -> TimeDelta {
        self.due_soon_window
    }

    /// Returns every bucket `task` belongs to at `now`.
    #[must_use]
    pub fn buckets_for(&self, task: &Task, now: DateTime<Utc>) -> Vec<TaskBucket> {
        TaskBucket::ALL
            .into_iter()
            .filter(|bucket| self.is_member(*bucket, task, now))
            .collect()
    }

    /// Filters and classifies `tasks` as of `now`.
    #[must_use]
    pub fn classify<'a>(
        &self,
        tasks: impl IntoIterator<Item = &'a Task>,
        filter: &TaskFilter,
        now: DateTime<Utc>,
    ) -> TaskBoard {
        let mut board = TaskBoard::empty(now);
        for task in tasks.into_iter().filter(|task| filter.matches(task)) {
            for bucket in self.buckets_for(task, now) {
                board.bucket_mut(bucket).push(task.clone());
            }
        }
        for bucket in TaskBucket::ALL {
            board.bucket_mut(bucket).sort_by(display_order);
        }
        board
    }

    fn is_member(&self, bucket: TaskBucket, task: &Task, now: DateTime<Utc>) -> bool {
        let status = task.effective_status(now);
        let until_due = task.due_time().map(|due| due - now);
        match bucket {
            TaskBucket::Pending => {
                status == TaskStatusKind::Pending
                    && until_due.is_none_or(|delta| delta > self.due_soon_window)
            }
            TaskBucket::Due => {
                status == TaskStatusKind::Due
                    || (status == TaskStatusKind::Pending
                        && until_due.is_some_and(|delta| {
                            delta >= TimeDelta::zero() && delta <= self.due_soon_window
                        }))
            }
            TaskBucket::Overdue => {
                matches!(status, TaskStatusKind::Pending | TaskStatusKind::Due)
                    && task.due_time().is_some_and(|due| due < now)
            }
            TaskBucket::InProgress => status == TaskStatusKind::InProgress,
            TaskBucket::Completed => status == TaskStatusKind::Completed,
        }
    }
}

/// Most urgent priority first, then earliest due time with undated tasks
/// last, then identifier for a stable order.
fn display_order(left: &Task, right: &Task) -> Ordering {
    left.priority()
        .rank()
        .cmp(&right.priority().rank())
        .then_with(|| match (left.due_time(), right.due_time()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| left.id().cmp(&right.id()))
}
