//! Port contracts for the nursing task board.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;

#[cfg(test)]
pub use repository::MockTaskRepository;
pub use repository::{TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
