//! Domain model for the nursing task board.
//!
//! The domain holds the task aggregate, its status machine, and the pure
//! classifier that derives board buckets. Nothing here performs I/O; the
//! current instant is always supplied by the caller or a [`mockable::Clock`].

mod admission;
mod board;
mod error;
mod filter;
mod ids;
mod priority;
mod status;
mod task;
mod transition;

pub use admission::Admission;
pub use board::{BoardSummary, DEFAULT_DUE_SOON_WINDOW_HOURS, TaskBoard, TaskBucket, TaskClassifier};
pub use error::{
    ParseTaskCategoryError, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError,
};
pub use filter::TaskFilter;
pub use ids::{CaregiverName, TaskId, TransitionReason};
pub use priority::{TaskCategory, TaskPriority};
pub use status::{TaskStatus, TaskStatusKind};
pub use task::{PersistedTaskData, Task, TaskDetails};
pub use transition::{TaskTransition, TransitionRequest};
