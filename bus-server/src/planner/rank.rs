//! Ranking of trip suggestions.
//!
//! All sorts here are stable: suggestions that tie keep the order in which
//! the schedule lists their trips.

use crate::realtime::ActiveTripSet;

use super::matcher::TripCandidate;

/// Sort candidates by minutes until departure, soonest first.
pub fn rank_by_departure(mut candidates: Vec<TripCandidate>) -> Vec<TripCandidate> {
    candidates.sort_by_key(|c| c.delta_minutes);
    candidates
}

/// Mark live trips and move them ahead of the rest.
///
/// Candidates are ranked by:
/// 1. Whether the trip is active in `active` (active first)
/// 2. Minutes until departure (sooner first)
pub fn prioritize_active(
    mut candidates: Vec<TripCandidate>,
    active: &ActiveTripSet,
) -> Vec<TripCandidate> {
    for candidate in &mut candidates {
        candidate.is_active = active.contains(&candidate.trip_id);
    }
    candidates.sort_by_key(|c| (!c.is_active, c.delta_minutes));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ScheduleTime, StopSequence};

    fn candidate(trip_id: &str, delta_minutes: u32) -> TripCandidate {
        TripCandidate {
            trip_id: trip_id.to_string(),
            route_id: None,
            route_display_name: None,
            origin_time: ScheduleTime::MIDNIGHT,
            dest_time: None,
            delta_minutes,
            origin_sequence: StopSequence(1),
            dest_sequence: StopSequence(2),
            is_active: false,
        }
    }

    fn active(ids: &[&str]) -> ActiveTripSet {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn ids(candidates: &[TripCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.trip_id.as_str()).collect()
    }

    #[test]
    fn rank_by_delta() {
        let ranked = rank_by_departure(vec![
            candidate("C", 30),
            candidate("A", 5),
            candidate("B", 10),
        ]);
        assert_eq!(ids(&ranked), vec!["A", "B", "C"]);
    }

    #[test]
    fn active_trip_beats_earlier_inactive_trip() {
        let ranked = prioritize_active(
            vec![candidate("T2", 10), candidate("T1", 40)],
            &active(&["T1"]),
        );
        assert_eq!(ids(&ranked), vec!["T1", "T2"]);
        assert!(ranked[0].is_active);
        assert!(!ranked[1].is_active);
    }

    #[test]
    fn no_active_trips_keeps_departure_order() {
        let ranked = prioritize_active(
            vec![candidate("A", 5), candidate("B", 10)],
            &ActiveTripSet::empty(),
        );
        assert_eq!(ids(&ranked), vec!["A", "B"]);
        assert!(ranked.iter().all(|c| !c.is_active));
    }

    #[test]
    fn each_partition_ordered_by_delta() {
        let ranked = prioritize_active(
            vec![
                candidate("I1", 1),
                candidate("A2", 50),
                candidate("I2", 20),
                candidate("A1", 30),
            ],
            &active(&["A1", "A2"]),
        );
        assert_eq!(ids(&ranked), vec!["A1", "A2", "I1", "I2"]);
    }

    #[test]
    fn ties_are_stable() {
        let ranked = prioritize_active(
            vec![candidate("X", 10), candidate("Y", 10), candidate("Z", 10)],
            &active(&["Z"]),
        );
        assert_eq!(ids(&ranked), vec!["Z", "X", "Y"]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{ScheduleTime, StopSequence};
    use proptest::prelude::*;

    fn candidates_strategy() -> impl Strategy<Value = Vec<(u32, bool)>> {
        prop::collection::vec((0u32..=1440, any::<bool>()), 0..30)
    }

    fn build(spec: &[(u32, bool)]) -> (Vec<TripCandidate>, ActiveTripSet) {
        let candidates = spec
            .iter()
            .enumerate()
            .map(|(i, &(delta, _))| TripCandidate {
                trip_id: format!("T{i}"),
                route_id: None,
                route_display_name: None,
                origin_time: ScheduleTime::MIDNIGHT,
                dest_time: None,
                delta_minutes: delta,
                origin_sequence: StopSequence(1),
                dest_sequence: StopSequence(2),
                is_active: false,
            })
            .collect();
        let active = spec
            .iter()
            .enumerate()
            .filter(|(_, (_, live))| *live)
            .map(|(i, _)| format!("T{i}"))
            .collect();
        (candidates, active)
    }

    proptest! {
        #[test]
        fn active_partition_comes_first(spec in candidates_strategy()) {
            let (candidates, active) = build(&spec);
            let ranked = prioritize_active(candidates, &active);

            let first_inactive = ranked.iter().position(|c| !c.is_active).unwrap_or(ranked.len());
            prop_assert!(ranked[first_inactive..].iter().all(|c| !c.is_active));
        }

        #[test]
        fn partitions_are_sorted_by_delta(spec in candidates_strategy()) {
            let (candidates, active) = build(&spec);
            let ranked = prioritize_active(candidates, &active);

            for window in ranked.windows(2) {
                if window[0].is_active == window[1].is_active {
                    prop_assert!(window[0].delta_minutes <= window[1].delta_minutes);
                }
            }
        }

        #[test]
        fn prioritize_preserves_elements(spec in candidates_strategy()) {
            let (candidates, active) = build(&spec);
            let original_len = candidates.len();
            let ranked = prioritize_active(candidates, &active);

            prop_assert_eq!(ranked.len(), original_len);
        }
    }
}
