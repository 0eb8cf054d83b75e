//! Fallback strategy: next departures from the origin alone.
//!
//! Used when no trip in the schedule runs from origin to destination, for
//! example when the journey needs a transfer. Riders still get the next
//! buses leaving their stop.

use crate::domain::ScheduleTime;
use crate::schedule::ScheduleIndex;

use super::matcher::minutes_until_departure;

/// A trip leaving the origin stop, regardless of where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextDeparture {
    pub trip_id: String,
    pub route_id: Option<String>,
    pub origin_time: ScheduleTime,
    pub delta_minutes: u32,
}

/// Departures from `origin_stop_id` within the next day, soonest first.
///
/// Only each trip's first call at the origin is considered.
pub fn next_departures(
    origin_stop_id: &str,
    index: &ScheduleIndex,
    now_minutes: f64,
) -> Vec<NextDeparture> {
    let mut departures: Vec<NextDeparture> = index
        .trips()
        .filter_map(|trip| {
            let origin = trip.stop_times.iter().find(|e| e.stop_id == origin_stop_id)?;
            let delta_minutes = minutes_until_departure(origin, now_minutes)?;
            Some(NextDeparture {
                trip_id: trip.id.clone(),
                route_id: trip.route_id.clone(),
                origin_time: origin.boarding_time(),
                delta_minutes,
            })
        })
        .collect();

    departures.sort_by_key(|d| d.delta_minutes);
    departures
}
