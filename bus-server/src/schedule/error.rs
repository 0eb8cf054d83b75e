//! Schedule loading error types.

use std::path::PathBuf;

/// Errors that make a schedule unusable as a whole.
///
/// Individual malformed rows are not errors; they are skipped and counted
/// in the index's build report.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// A required GTFS table is absent
    #[error("required GTFS table {name} not found in {}", dir.display())]
    MissingTable { name: &'static str, dir: PathBuf },

    /// A table exists but could not be opened or read
    #[error("failed to read {table}: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    /// The background load task panicked or was cancelled
    #[error("schedule load task failed: {message}")]
    Task { message: String },

    /// The store was built from memory and has nothing to reload
    #[error("schedule store has no source directory to refresh from")]
    NoSource,
}
