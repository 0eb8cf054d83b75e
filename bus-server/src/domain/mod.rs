//! Domain types for the bus trip resolver.
//!
//! Values here are already normalized: the schedule loader collapses the
//! loosely typed GTFS columns into these shapes, so code receiving them does
//! not need to re-check the raw text.

mod route;
mod stop_time;
mod time;

pub use route::{Route, Stop};
pub use stop_time::{StopSequence, StopTimeEntry};
pub use time::{MINUTES_PER_DAY, ScheduleTime, TimeError, minutes_since_midnight};
