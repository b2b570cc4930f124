//! Conjunctive pre-filters applied before board classification.

use super::{Task, TaskPriority};

/// Board filter: free-text search, priority, and ward.
///
/// Every active criterion must pass. Blank search text is inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    search: Option<String>,
    priority: Option<TaskPriority>,
    ward: Option<String>,
}

impl TaskFilter {
    /// Creates a filter that accepts every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets case-insensitive search text matched against the description,
    /// patient name, and assigned nurse.
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        let raw = text.into();
        let trimmed = raw.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_lowercase());
        self
    }

    /// Restricts the board to one priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts the board to one ward, matched exactly after trimming.
    /// Blank ward text leaves the criterion inactive.
    #[must_use]
    pub fn with_ward(mut self, ward: impl Into<String>) -> Self {
        let raw = ward.into();
        let trimmed = raw.trim();
        self.ward = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Returns whether `task` passes every active criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task) && self.matches_priority(task) && self.matches_ward(task)
    }

    fn matches_search(&self, task: &Task) -> bool {
        let Some(needle) = self.search.as_deref() else {
            return true;
        };
        let patient = task.admission().map(|admission| admission.patient_name.as_str());
        let nurse = task.assigned_nurse().map(|nurse| nurse.as_str());
        [Some(task.description()), patient, nurse]
            .into_iter()
            .flatten()
            .any(|haystack| haystack.to_lowercase().contains(needle))
    }

    fn matches_priority(&self, task: &Task) -> bool {
        self.priority
            .is_none_or(|priority| task.priority() == priority)
    }

    fn matches_ward(&self, task: &Task) -> bool {
        let Some(ward) = self.ward.as_deref() else {
            return true;
        };
        task.admission()
            .and_then(|admission| admission.ward.as_deref())
            .is_some_and(|task_ward| task_ward == ward)
    }
}
