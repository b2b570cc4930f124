//! Board configuration.

use crate::task::domain::{DEFAULT_DUE_SOON_WINDOW_HOURS, TaskClassifier};
use chrono::TimeDelta;
use std::time::Duration;

/// Default interval between board polls, in seconds.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Shortest interval the poller will tick at.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Tunables for board polling and classification.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use wardboard::task::services::BoardConfig;
///
/// let config = BoardConfig::default();
/// assert_eq!(config.poll_interval, Duration::from_secs(30));
/// assert_eq!(config.due_soon_window, chrono::TimeDelta::hours(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Interval between board refreshes.
    pub poll_interval: Duration,
    /// How far ahead a pending task counts as due.
    pub due_soon_window: TimeDelta,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            TimeDelta::hours(DEFAULT_DUE_SOON_WINDOW_HOURS),
        )
    }
}

impl BoardConfig {
    /// Creates a configuration from explicit values.
    ///
    /// The poll interval is raised to [`MIN_POLL_INTERVAL`] and a negative
    /// window is clamped to zero.
    #[must_use]
    pub fn new(poll_interval: Duration, due_soon_window: TimeDelta) -> Self {
        Self {
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
            due_soon_window: due_soon_window.max(TimeDelta::zero()),
        }
    }

    /// Overrides the poll interval, raising it to [`MIN_POLL_INTERVAL`].
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// Overrides the due-soon window, clamping negative values to zero.
    #[must_use]
    pub fn with_due_soon_window(mut self, due_soon_window: TimeDelta) -> Self {
        self.due_soon_window = due_soon_window.max(TimeDelta::zero());
        self
    }

    /// Returns the interval the poller ticks at.
    ///
    /// Applies the same [`MIN_POLL_INTERVAL`] floor as the constructors.
    #[must_use]
    pub fn effective_poll_interval(&self) -> Duration {
        self.poll_interval.max(MIN_POLL_INTERVAL)
    }

    /// Returns a classifier using this configuration's window.
    #[must_use]
    pub fn classifier(&self) -> TaskClassifier {
        TaskClassifier::new(self.due_soon_window)
    }
}
