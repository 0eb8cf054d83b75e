//! Static GTFS schedule: loading, indexing, and snapshot management.
//!
//! The loader turns the CSV tables of a GTFS directory into a
//! [`ScheduleIndex`]; the [`ScheduleStore`] hands out shared read-only
//! snapshots of it and swaps in a fresh one on refresh.

mod error;
mod index;
mod loader;
mod records;
mod store;

pub use error::ScheduleError;
pub use index::{ScheduleIndex, Trip};
pub use loader::load_schedule;
pub use records::{BuildReport, RouteRecord, StopRecord, StopTimeRecord, TripRecord};
pub use store::ScheduleStore;
