//! Caller-owned polling loop that keeps a classified board fresh.
//!
//! The poller fetches and classifies on a fixed interval and whenever a
//! refresh is requested (typically right after a successful transition).
//! The latest board is published on a watch channel; a failed fetch keeps
//! the previous board.

use crate::task::{
    domain::{TaskBoard, TaskFilter},
    ports::{TaskQuery, TaskRepository},
    services::{TaskLifecycleResult, TaskLifecycleService},
};
use mockable::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Notify, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Board published by one completed poll pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Pass number, starting at 1.
    pub sequence: u64,
    /// Classified board.
    pub board: TaskBoard,
}

/// Cloneable handle for asking the poller to refresh immediately.
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    notify: Arc<Notify>,
}

impl RefreshHandle {
    /// Requests an immediate refresh.
    ///
    /// Requests made while a pass is running are coalesced into one more
    /// pass.
    pub fn request_refresh(&self) {
        self.notify.notify_one();
    }
}

/// Interval-driven board poller.
pub struct BoardPoller<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    service: TaskLifecycleService<R, C>,
    query: TaskQuery,
    filter: TaskFilter,
    refresh: Arc<Notify>,
    sequence: AtomicU64,
    snapshot_tx: watch::Sender<Option<BoardSnapshot>>,
}

impl<R, C> BoardPoller<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a poller for the given query and board filter.
    #[must_use]
    pub fn new(service: TaskLifecycleService<R, C>, query: TaskQuery, filter: TaskFilter) -> Self {
        let (snapshot_tx, _) = watch::channel(None);
        Self {
            service,
            query,
            filter,
            refresh: Arc::new(Notify::new()),
            sequence: AtomicU64::new(0),
            snapshot_tx,
        }
    }

    /// Subscribes to published boards. The value is `None` until the first
    /// pass completes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<BoardSnapshot>> {
        self.snapshot_tx.subscribe()
    }

    /// Returns a handle for requesting immediate refreshes.
    #[must_use]
    pub fn refresh_handle(&self) -> RefreshHandle {
        RefreshHandle {
            notify: Arc::clone(&self.refresh),
        }
    }

    /// Returns the most recently published board, if any.
    #[must_use]
    pub fn latest(&self) -> Option<BoardSnapshot> {
        self.snapshot_tx.borrow().clone()
    }

    /// Runs one fetch-and-classify pass and publishes the result.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the previously published board is kept.
    pub async fn poll_once(&self) -> TaskLifecycleResult<BoardSnapshot> {
        let board = self.service.load_board(&self.query, &self.filter).await?;
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let summary = board.summary();
        debug!(
            sequence,
            pending = summary.pending,
            due = summary.due,
            overdue = summary.overdue,
            in_progress = summary.in_progress,
            completed = summary.completed,
            "task board refreshed"
        );
        let snapshot = BoardSnapshot { sequence, board };
        self.snapshot_tx.send_replace(Some(snapshot.clone()));
        Ok(snapshot)
    }

    /// Polls until `shutdown` is cancelled.
    ///
    /// The first pass runs immediately. Fetch failures are logged and the
    /// loop continues on the next tick.
    pub async fn run(&self, shutdown: CancellationToken) {
        let period = self.service.config().effective_poll_interval();
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX),
            "task board poller starting"
        );

        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    info!("task board poller stopped");
                    return;
                }
                _ = ticker.tick() => self.poll_logged().await,
                () = self.refresh.notified() => {
                    self.poll_logged().await;
                    ticker.reset();
                }
            }
        }
    }

    async fn poll_logged(&self) {
        if let Err(err) = self.poll_once().await {
            warn!(error = %err, "task board refresh failed");
        }
    }
}
