//! Shared, refreshable access to the current schedule.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::error::ScheduleError;
use super::index::ScheduleIndex;
use super::loader::load_schedule;

/// Thread-safe holder of the current schedule snapshot.
///
/// Readers take an `Arc` to an immutable index and keep using it for the
/// whole request. A refresh builds a complete new index first and then swaps
/// the pointer, so no reader ever sees a half-built schedule.
#[derive(Clone)]
pub struct ScheduleStore {
    current: Arc<RwLock<Arc<ScheduleIndex>>>,
    source: Option<PathBuf>,
}

impl ScheduleStore {
    /// Create a store around an already-built index (for tests and tools).
    pub fn new(index: ScheduleIndex) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(index))),
            source: None,
        }
    }

    /// Create a store by loading the GTFS directory at `dir`.
    ///
    /// This will fail if a required table is missing or unreadable.
    pub async fn load(dir: impl Into<PathBuf>) -> Result<Self, ScheduleError> {
        let dir = dir.into();
        let index = load_in_background(dir.clone()).await?;
        Ok(Self {
            current: Arc::new(RwLock::new(Arc::new(index))),
            source: Some(dir),
        })
    }

    /// The current schedule.
    pub async fn snapshot(&self) -> Arc<ScheduleIndex> {
        let guard = self.current.read().await;
        Arc::clone(&*guard)
    }

    /// Swap in a new schedule.
    pub async fn replace(&self, index: ScheduleIndex) {
        let index = Arc::new(index);
        let mut guard = self.current.write().await;
        *guard = index;
    }

    /// Reload the schedule from its source directory.
    ///
    /// On success, replaces the current snapshot and returns its trip count.
    /// On failure, the existing snapshot is kept and the error is returned.
    pub async fn refresh(&self) -> Result<usize, ScheduleError> {
        let dir = self.source.clone().ok_or(ScheduleError::NoSource)?;
        let index = load_in_background(dir).await?;
        let count = index.trip_count();
        self.replace(index).await;
        Ok(count)
    }
}

/// Run the blocking loader off the async worker threads.
async fn load_in_background(dir: PathBuf) -> Result<ScheduleIndex, ScheduleError> {
    tokio::task::spawn_blocking(move || load_schedule(&dir))
        .await
        .map_err(|e| ScheduleError::Task {
            message: e.to_string(),
        })?
}
