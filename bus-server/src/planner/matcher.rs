//! Candidate matcher: trips that serve the origin and then the destination.

use crate::domain::{MINUTES_PER_DAY, ScheduleTime, StopSequence, StopTimeEntry};
use crate::schedule::ScheduleIndex;

use super::rank::rank_by_departure;

/// A trip that can carry a rider from origin to destination.
#[derive(Debug, Clone, PartialEq)]
pub struct TripCandidate {
    pub trip_id: String,
    pub route_id: Option<String>,
    /// Route short name, long name, or bare id, whichever is available.
    pub route_display_name: Option<String>,
    /// Boarding time at the origin.
    pub origin_time: ScheduleTime,
    /// Alighting time at the destination, if the schedule gives one.
    pub dest_time: Option<ScheduleTime>,
    /// Whole minutes from now until boarding, within one day.
    pub delta_minutes: u32,
    pub origin_sequence: StopSequence,
    pub dest_sequence: StopSequence,
    /// Set by the realtime overlay when the trip has a live vehicle.
    pub is_active: bool,
}

/// Find every trip that calls at `origin_stop_id` and later at
/// `dest_stop_id`, soonest departure first.
///
/// Each trip is scanned once; the first call at the origin and the first
/// call at the destination are the ones compared, even if the trip visits
/// either stop again later. Trips whose destination call does not come
/// strictly after the origin call, or where either call has no numeric
/// sequence, are skipped. So are departures outside the next 24 hours.
///
/// Ties keep the index's trip order.
pub fn find_candidates(
    origin_stop_id: &str,
    dest_stop_id: &str,
    index: &ScheduleIndex,
    now_minutes: f64,
) -> Vec<TripCandidate> {
    let mut candidates = Vec::new();

    for trip in index.trips() {
        let (Some(origin), Some(dest)) =
            first_calls(&trip.stop_times, origin_stop_id, dest_stop_id)
        else {
            continue;
        };

        let (Some(origin_sequence), Some(dest_sequence)) = (origin.stop_sequence, dest.stop_sequence)
        else {
            continue;
        };
        if dest_sequence <= origin_sequence {
            continue;
        }

        let Some(delta_minutes) = minutes_until_departure(origin, now_minutes) else {
            continue;
        };

        candidates.push(TripCandidate {
            trip_id: trip.id.clone(),
            route_id: trip.route_id.clone(),
            route_display_name: trip
                .route_id
                .as_deref()
                .map(|id| index.route_display_name(id)),
            origin_time: origin.boarding_time(),
            dest_time: dest.alighting_time(),
            delta_minutes,
            origin_sequence,
            dest_sequence,
            is_active: false,
        });
    }

    rank_by_departure(candidates)
}

/// First call at each of two stops, found in one pass.
fn first_calls<'a>(
    stop_times: &'a [StopTimeEntry],
    origin_stop_id: &str,
    dest_stop_id: &str,
) -> (Option<&'a StopTimeEntry>, Option<&'a StopTimeEntry>) {
    let mut origin = None;
    let mut dest = None;
    for entry in stop_times {
        if origin.is_none() && entry.stop_id == origin_stop_id {
            origin = Some(entry);
        }
        if dest.is_none() && entry.stop_id == dest_stop_id {
            dest = Some(entry);
        }
        if origin.is_some() && dest.is_some() {
            break;
        }
    }
    (origin, dest)
}

/// Rounded minutes from `now_minutes` until boarding at `entry`, or `None`
/// if that falls outside the one-day look-ahead.
pub(crate) fn minutes_until_departure(entry: &StopTimeEntry, now_minutes: f64) -> Option<u32> {
    let delta = entry.boarding_time().minutes_until(now_minutes);
    if !(0.0..=MINUTES_PER_DAY).contains(&delta) {
        return None;
    }
    Some(delta.round() as u32)
}
