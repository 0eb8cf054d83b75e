//! Reads a GTFS directory into a [`ScheduleIndex`].

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::warn;

use super::error::ScheduleError;
use super::index::ScheduleIndex;
use super::records::{RouteRecord, StopRecord, StopTimeRecord, TripRecord};

pub const STOP_TIMES_TABLE: &str = "stop_times.txt";
pub const TRIPS_TABLE: &str = "trips.txt";
pub const ROUTES_TABLE: &str = "routes.txt";
pub const STOPS_TABLE: &str = "stops.txt";

/// Load and index the schedule in `dir`.
///
/// `stop_times.txt` and `trips.txt` are required; `routes.txt` and
/// `stops.txt` are used when present. This does blocking file I/O.
pub fn load_schedule(dir: &Path) -> Result<ScheduleIndex, ScheduleError> {
    let stop_times: Vec<StopTimeRecord> = read_required(dir, STOP_TIMES_TABLE)?;
    let trips: Vec<TripRecord> = read_required(dir, TRIPS_TABLE)?;
    let routes: Vec<RouteRecord> = read_optional(dir, ROUTES_TABLE)?;
    let stops: Vec<StopRecord> = read_optional(dir, STOPS_TABLE)?;

    let index = ScheduleIndex::build(stop_times, trips, routes).with_stops(stops);
    index.log_summary();
    Ok(index)
}

fn read_required<T: DeserializeOwned>(
    dir: &Path,
    table: &'static str,
) -> Result<Vec<T>, ScheduleError> {
    let path = dir.join(table);
    if !path.is_file() {
        return Err(ScheduleError::MissingTable {
            name: table,
            dir: dir.to_path_buf(),
        });
    }
    read_table(&path, table)
}

fn read_optional<T: DeserializeOwned>(
    dir: &Path,
    table: &'static str,
) -> Result<Vec<T>, ScheduleError> {
    let path = dir.join(table);
    if !path.is_file() {
        return Ok(Vec::new());
    }
    read_table(&path, table)
}

/// Read every row of one table, skipping rows that fail to deserialize.
fn read_table<T: DeserializeOwned>(
    path: &Path,
    table: &'static str,
) -> Result<Vec<T>, ScheduleError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| ScheduleError::Csv { table, source })?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.deserialize() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                if skipped == 1 {
                    warn!(table, error = %e, "skipping unreadable row");
                }
            }
        }
    }
    if skipped > 1 {
        warn!(table, skipped, "skipped unreadable rows");
    }

    Ok(rows)
}
