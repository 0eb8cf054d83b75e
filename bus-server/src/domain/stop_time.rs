//! Stop-time entries: one scheduled call of a trip at a stop.

use std::fmt;

use super::time::ScheduleTime;

/// Position of a call within its trip.
///
/// Sequence numbers only order calls of the same trip. They increase along
/// the trip but need not be consecutive, and carry no meaning across trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopSequence(pub u32);

impl StopSequence {
    /// Parse a sequence number, returning `None` for anything non-numeric.
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse().ok().map(StopSequence)
    }
}

impl fmt::Display for StopSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One scheduled call of a trip at a stop.
///
/// Immutable once loaded. Times are `None` when the source field was blank
/// or unreadable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTimeEntry {
    pub trip_id: String,
    pub stop_id: String,
    pub arrival_time: Option<ScheduleTime>,
    pub departure_time: Option<ScheduleTime>,
    /// `None` when the source value was not a number. Such entries never
    /// take part in before/after comparisons.
    pub stop_sequence: Option<StopSequence>,
}

impl StopTimeEntry {
    /// When a rider can board here.
    ///
    /// Departure time, falling back to arrival time, falling back to midnight
    /// when the entry carries neither.
    pub fn boarding_time(&self) -> ScheduleTime {
        self.departure_time
            .or(self.arrival_time)
            .unwrap_or(ScheduleTime::MIDNIGHT)
    }

    /// When a rider gets off here: arrival time, falling back to departure.
    pub fn alighting_time(&self) -> Option<ScheduleTime> {
        self.arrival_time.or(self.departure_time)
    }
}
