//! Application services for the nursing task board.

mod config;
mod lifecycle;
mod poller;

pub use config::{BoardConfig, MIN_POLL_INTERVAL};
pub use lifecycle::{
    CreateNursingTaskRequest, GENERIC_FAILURE_MESSAGE, TaskErrorKind, TaskLifecycleError,
    TaskLifecycleResult, TaskLifecycleService,
};
pub use poller::{BoardPoller, BoardSnapshot, RefreshHandle};
