//! Schedule index: trips, their ordered calls, and their routes.
//!
//! Built once from already-parsed tables and read-only afterwards, so a
//! single index can be shared by any number of concurrent requests.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::domain::{Route, Stop, StopTimeEntry};

use super::records::{BuildReport, RouteRecord, StopRecord, StopTimeRecord, TripRecord};

/// A trip with its calls in stop-sequence order.
#[derive(Debug, Clone)]
pub struct Trip {
    pub id: String,
    /// Route serving this trip, if the trips table names one.
    pub route_id: Option<String>,
    /// Calls sorted by ascending sequence. Calls with a non-numeric
    /// sequence keep their file order and come last.
    pub stop_times: Vec<StopTimeEntry>,
}

/// Lookup tables over one static schedule.
///
/// Trips iterate in the order their first call appears in the stop-times
/// table, which keeps every ranking that ties on time deterministic.
#[derive(Debug, Default)]
pub struct ScheduleIndex {
    trips: Vec<Trip>,
    trip_positions: HashMap<String, usize>,
    routes: HashMap<String, Route>,
    stops: Vec<Stop>,
    report: BuildReport,
}

impl ScheduleIndex {
    /// An index with no trips.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the index from stop-time, trip and route rows.
    ///
    /// Rows without a trip id are skipped. Route rows without a route id are
    /// ignored. Trips listed in the trips table but never called at are not
    /// indexed.
    pub fn build(
        stop_times: impl IntoIterator<Item = StopTimeRecord>,
        trips: impl IntoIterator<Item = TripRecord>,
        routes: impl IntoIterator<Item = RouteRecord>,
    ) -> Self {
        let mut report = BuildReport::default();
        let mut index_trips: Vec<Trip> = Vec::new();
        let mut trip_positions: HashMap<String, usize> = HashMap::new();

        for record in stop_times {
            let Some(entry) = record.normalize(&mut report) else {
                continue;
            };
            let position = *trip_positions
                .entry(entry.trip_id.clone())
                .or_insert_with(|| {
                    index_trips.push(Trip {
                        id: entry.trip_id.clone(),
                        route_id: None,
                        stop_times: Vec::new(),
                    });
                    index_trips.len() - 1
                });
            index_trips[position].stop_times.push(entry);
        }

        for trip in &mut index_trips {
            trip.stop_times
                .sort_by_key(|e| (e.stop_sequence.is_none(), e.stop_sequence));
        }

        for record in trips {
            let trip_id = record.trip_id.trim();
            let route_id = record.route_id.trim();
            if trip_id.is_empty() || route_id.is_empty() {
                continue;
            }
            if let Some(&position) = trip_positions.get(trip_id) {
                index_trips[position].route_id = Some(route_id.to_string());
            }
        }

        let routes = routes
            .into_iter()
            .filter_map(|r| {
                let id = r.route_id.trim();
                (!id.is_empty()).then(|| {
                    (
                        id.to_string(),
                        Route {
                            id: id.to_string(),
                            short_name: r.route_short_name.trim().to_string(),
                            long_name: r.route_long_name.trim().to_string(),
                        },
                    )
                })
            })
            .collect();

        Self {
            trips: index_trips,
            trip_positions,
            routes,
            stops: Vec::new(),
            report,
        }
    }

    /// Attach the stops table, keeping only stops with an id and position.
    pub fn with_stops(mut self, stops: impl IntoIterator<Item = StopRecord>) -> Self {
        for record in stops {
            match record.normalize() {
                Some(stop) => self.stops.push(stop),
                None => self.report.unplaceable_stops += 1,
            }
        }
        self
    }

    /// Log a summary of what was indexed and what was dropped.
    pub fn log_summary(&self) {
        info!(
            trips = self.trips.len(),
            routes = self.routes.len(),
            stops = self.stops.len(),
            stop_time_rows = self.report.stop_time_rows,
            "schedule indexed"
        );
        if !self.report.is_clean() {
            warn!(
                missing_trip_id = self.report.missing_trip_id,
                bad_sequence = self.report.bad_sequence,
                bad_time = self.report.bad_time,
                unplaceable_stops = self.report.unplaceable_stops,
                "skipped or degraded malformed schedule rows"
            );
        }
    }

    /// Look up a trip by id.
    pub fn trip(&self, trip_id: &str) -> Option<&Trip> {
        self.trip_positions.get(trip_id).map(|&i| &self.trips[i])
    }

    /// All calls of a trip, in sequence order. Empty for unknown trips.
    pub fn stop_times(&self, trip_id: &str) -> &[StopTimeEntry] {
        self.trip(trip_id)
            .map(|t| t.stop_times.as_slice())
            .unwrap_or(&[])
    }

    /// Route id of a trip.
    pub fn route_id(&self, trip_id: &str) -> Option<&str> {
        self.trip(trip_id)?.route_id.as_deref()
    }

    /// Look up a route by id.
    pub fn route(&self, route_id: &str) -> Option<&Route> {
        self.routes.get(route_id)
    }

    /// Name to show for a route id: the route's display name, or the bare id
    /// when the routes table does not describe it.
    pub fn route_display_name(&self, route_id: &str) -> String {
        self.route(route_id)
            .map(|r| r.display_name().to_string())
            .unwrap_or_else(|| route_id.to_string())
    }

    /// All trips, in first-appearance order.
    pub fn trips(&self) -> impl Iterator<Item = &Trip> {
        self.trips.iter()
    }

    /// Number of indexed trips.
    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// True if no trips were indexed.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Stops with a known position.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// What was dropped while building.
    pub fn report(&self) -> &BuildReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopSequence;

    fn st(trip: &str, stop: &str, time: &str, seq: &str) -> StopTimeRecord {
        StopTimeRecord {
            trip_id: trip.into(),
            stop_id: stop.into(),
            arrival_time: time.into(),
            departure_time: time.into(),
            stop_sequence: seq.into(),
        }
    }

    fn trip(trip: &str, route: &str) -> TripRecord {
        TripRecord {
            trip_id: trip.into(),
            route_id: route.into(),
        }
    }

    fn route(id: &str, short: &str, long: &str) -> RouteRecord {
        RouteRecord {
            route_id: id.into(),
            route_short_name: short.into(),
            route_long_name: long.into(),
        }
    }

    fn stop_ids(index: &ScheduleIndex, trip_id: &str) -> Vec<String> {
        index
            .stop_times(trip_id)
            .iter()
            .map(|e| e.stop_id.clone())
            .collect()
    }

    #[test]
    fn empty_input() {
        let index = ScheduleIndex::build(vec![], vec![], vec![]);
        assert!(index.is_empty());
        assert_eq!(index.trip_count(), 0);
        assert!(index.stop_times("T1").is_empty());
        assert_eq!(index.route_id("T1"), None);
    }

    #[test]
    fn groups_and_orders_by_sequence() {
        let index = ScheduleIndex::build(
            vec![
                st("T1", "C", "10:40:00", "3"),
                st("T2", "X", "11:00:00", "1"),
                st("T1", "A", "10:00:00", "1"),
                st("T1", "B", "10:20:00", "2"),
            ],
            vec![],
            vec![],
        );

        assert_eq!(index.trip_count(), 2);
        assert_eq!(stop_ids(&index, "T1"), vec!["A", "B", "C"]);
        assert_eq!(stop_ids(&index, "T2"), vec!["X"]);

        let order: Vec<_> = index.trips().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["T1", "T2"]);
    }

    #[test]
    fn sequences_compare_numerically() {
        let index = ScheduleIndex::build(
            vec![
                st("T1", "J", "10:40:00", "10"),
                st("T1", "B", "10:20:00", "2"),
            ],
            vec![],
            vec![],
        );
        assert_eq!(stop_ids(&index, "T1"), vec!["B", "J"]);
    }

    #[test]
    fn non_numeric_sequences_sort_last() {
        let index = ScheduleIndex::build(
            vec![
                st("T1", "Q", "10:50:00", "?"),
                st("T1", "B", "10:20:00", "2"),
                st("T1", "A", "10:00:00", "1"),
            ],
            vec![],
            vec![],
        );
        assert_eq!(stop_ids(&index, "T1"), vec!["A", "B", "Q"]);
        assert_eq!(index.stop_times("T1")[2].stop_sequence, None);
        assert_eq!(index.report().bad_sequence, 1);
    }

    #[test]
    fn rows_without_trip_are_skipped() {
        let index = ScheduleIndex::build(
            vec![st("", "A", "10:00:00", "1"), st("T1", "A", "10:00:00", "1")],
            vec![],
            vec![],
        );
        assert_eq!(index.trip_count(), 1);
        assert_eq!(index.report().missing_trip_id, 1);
    }

    #[test]
    fn resolves_routes() {
        let index = ScheduleIndex::build(
            vec![
                st("T1", "A", "10:00:00", "1"),
                st("T2", "A", "10:05:00", "1"),
                st("T3", "A", "10:10:00", "1"),
            ],
            vec![trip("T1", "R1"), trip("T2", "R2"), trip("T9", "R1")],
            vec![route("R1", "12", "Harbour Loop"), route("", "orphan", "")],
        );

        assert_eq!(index.route_id("T1"), Some("R1"));
        assert_eq!(index.route_id("T2"), Some("R2"));
        assert_eq!(index.route_id("T3"), None);
        assert!(index.trip("T9").is_none());

        assert_eq!(index.route_display_name("R1"), "12");
        assert_eq!(index.route_display_name("R2"), "R2");
        assert_eq!(index.route("R1").unwrap().long_name, "Harbour Loop");
    }

    #[test]
    fn keeps_entry_fields() {
        let index = ScheduleIndex::build(vec![st("T1", "A", "25:10:00", "7")], vec![], vec![]);
        let entry = &index.stop_times("T1")[0];
        assert_eq!(entry.stop_sequence, Some(StopSequence(7)));
        assert_eq!(entry.boarding_time().to_string(), "25:10");
    }

    #[test]
    fn attaches_placeable_stops() {
        let index = ScheduleIndex::empty().with_stops(vec![
            StopRecord {
                stop_id: "S1".into(),
                stop_name: "Main St".into(),
                stop_lat: "1.0".into(),
                stop_lon: "2.0".into(),
                ..Default::default()
            },
            StopRecord {
                stop_id: "S2".into(),
                ..Default::default()
            },
        ]);
        assert_eq!(index.stops().len(), 1);
        assert_eq!(index.stops()[0].name, "Main St");
        assert_eq!(index.report().unplaceable_stops, 1);
    }
}
