//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Stop, StopTimeEntry};
use crate::planner::{Diagnostics, NextDeparture, Resolution, Suggestions, TripCandidate};

/// Query string of `/api/route-candidates`.
///
/// Everything is read as text so that a bad number can be handled per
/// field instead of rejecting the whole query.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteCandidatesQuery {
    /// Origin stop id
    pub origin: Option<String>,

    /// Destination stop id
    pub dest: Option<String>,

    /// Number of suggestions wanted
    pub max_results: Option<String>,

    /// Agency whose realtime feed marks trips as live
    pub agency: Option<String>,

    /// Minutes since local midnight to plan from (defaults to now)
    pub now_minutes: Option<String>,
}

impl RouteCandidatesQuery {
    /// Requested result count. Absent or unparsable counts are `None`.
    pub fn max_results(&self) -> Option<usize> {
        self.max_results.as_deref()?.trim().parse().ok()
    }

    /// Planning time, if given. Errors if the value is not a minute of the day.
    pub fn now_minutes(&self) -> Result<Option<f64>, String> {
        let Some(raw) = non_blank(self.now_minutes.as_deref()) else {
            return Ok(None);
        };
        match raw.parse::<f64>() {
            Ok(m) if m.is_finite() && (0.0..1440.0).contains(&m) => Ok(Some(m)),
            _ => Err(format!("nowMinutes must be between 0 and 1440, got {raw}")),
        }
    }

    /// Origin stop id, if given and not blank.
    pub fn origin(&self) -> Option<&str> {
        non_blank(self.origin.as_deref())
    }

    /// Destination stop id, if given and not blank.
    pub fn dest(&self) -> Option<&str> {
        non_blank(self.dest.as_deref())
    }

    /// Agency, if given and not blank.
    pub fn agency(&self) -> Option<&str> {
        non_blank(self.agency.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A trip running from origin to destination.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResult {
    pub trip_id: String,
    pub route_id: Option<String>,
    /// Route name to show
    pub route: Option<String>,
    /// Boarding time, "HH:MM"
    pub origin_time: String,
    /// Alighting time, "HH:MM"
    pub dest_time: Option<String>,
    pub delta_minutes: u32,
    pub origin_seq: u32,
    pub dest_seq: u32,
    /// Whether a live vehicle is running this trip
    pub active: bool,
}

/// A departure from the origin when no trip reaches the destination.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureResult {
    pub trip_id: String,
    pub route_id: Option<String>,
    pub origin_time: String,
    pub delta_minutes: u32,
}

/// One entry of the `candidates` list; its shape depends on the mode.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SuggestionResult {
    Direct(CandidateResult),
    Fallback(DepartureResult),
}

/// A schedule row included in diagnostics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRowResult {
    pub trip_id: String,
    pub stop_id: String,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
    pub stop_sequence: Option<u32>,
}

/// Counts that explain the answer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsResult {
    pub trips_with_origin: usize,
    pub trips_with_dest: usize,
    pub sample_origin: Option<SampleRowResult>,
    pub sample_dest: Option<SampleRowResult>,
}

/// Response for `/api/route-candidates`.
#[derive(Debug, Serialize)]
pub struct RouteCandidatesResponse {
    pub candidates: Vec<SuggestionResult>,
    /// True when `candidates` are plain departures from the origin
    pub fallback: bool,
    pub diagnostics: DiagnosticsResult,
}

/// A stop on the map.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub stop_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Response for `/api/stops`.
#[derive(Debug, Serialize)]
pub struct StopsResponse {
    pub stops: Vec<StopResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl CandidateResult {
    /// Create from a matched trip.
    pub fn from_candidate(candidate: &TripCandidate) -> Self {
        Self {
            trip_id: candidate.trip_id.clone(),
            route_id: candidate.route_id.clone(),
            route: candidate.route_display_name.clone(),
            origin_time: candidate.origin_time.to_string(),
            dest_time: candidate.dest_time.map(|t| t.to_string()),
            delta_minutes: candidate.delta_minutes,
            origin_seq: candidate.origin_sequence.0,
            dest_seq: candidate.dest_sequence.0,
            active: candidate.is_active,
        }
    }
}

impl DepartureResult {
    /// Create from a fallback departure.
    pub fn from_departure(departure: &NextDeparture) -> Self {
        Self {
            trip_id: departure.trip_id.clone(),
            route_id: departure.route_id.clone(),
            origin_time: departure.origin_time.to_string(),
            delta_minutes: departure.delta_minutes,
        }
    }
}

impl SampleRowResult {
    fn from_entry(entry: &StopTimeEntry) -> Self {
        Self {
            trip_id: entry.trip_id.clone(),
            stop_id: entry.stop_id.clone(),
            arrival_time: entry.arrival_time.map(|t| t.to_string()),
            departure_time: entry.departure_time.map(|t| t.to_string()),
            stop_sequence: entry.stop_sequence.map(|s| s.0),
        }
    }
}

impl DiagnosticsResult {
    /// Create from resolver diagnostics.
    pub fn from_diagnostics(diagnostics: &Diagnostics) -> Self {
        Self {
            trips_with_origin: diagnostics.trips_with_origin,
            trips_with_dest: diagnostics.trips_with_dest,
            sample_origin: diagnostics.sample_origin.as_ref().map(SampleRowResult::from_entry),
            sample_dest: diagnostics.sample_dest.as_ref().map(SampleRowResult::from_entry),
        }
    }
}

impl RouteCandidatesResponse {
    /// Create from a resolution.
    pub fn from_resolution(resolution: &Resolution) -> Self {
        let candidates = match &resolution.suggestions {
            Suggestions::Direct(candidates) => candidates
                .iter()
                .map(|c| SuggestionResult::Direct(CandidateResult::from_candidate(c)))
                .collect(),
            Suggestions::Fallback(departures) => departures
                .iter()
                .map(|d| SuggestionResult::Fallback(DepartureResult::from_departure(d)))
                .collect(),
        };

        Self {
            candidates,
            fallback: resolution.is_fallback(),
            diagnostics: DiagnosticsResult::from_diagnostics(&resolution.diagnostics),
        }
    }
}

impl StopResult {
    /// Create from a domain stop.
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            stop_id: stop.id.clone(),
            name: stop.name.clone(),
            latitude: stop.latitude,
            longitude: stop.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ScheduleTime, StopSequence};
    use serde_json::json;

    fn time(s: &str) -> ScheduleTime {
        ScheduleTime::parse(s).unwrap()
    }

    fn query(pairs: &str) -> RouteCandidatesQuery {
        serde_json::from_value(serde_json::from_str(pairs).unwrap()).unwrap()
    }

    fn sample_entry() -> StopTimeEntry {
        StopTimeEntry {
            trip_id: "T1".into(),
            stop_id: "A".into(),
            arrival_time: None,
            departure_time: Some(time("10:00:00")),
            stop_sequence: Some(StopSequence(1)),
        }
    }

    #[test]
    fn query_reads_camel_case() {
        let q = query(r#"{"origin": "A", "dest": "B", "maxResults": "5", "nowMinutes": "500"}"#);
        assert_eq!(q.origin(), Some("A"));
        assert_eq!(q.dest(), Some("B"));
        assert_eq!(q.max_results(), Some(5));
        assert_eq!(q.now_minutes(), Ok(Some(500.0)));
        assert_eq!(q.agency(), None);
    }

    #[test]
    fn query_tolerates_bad_max_results() {
        let q = query(r#"{"maxResults": "lots"}"#);
        assert_eq!(q.max_results(), None);

        let q = query(r#"{"maxResults": "-2"}"#);
        assert_eq!(q.max_results(), None);
    }

    #[test]
    fn query_blank_fields_are_missing() {
        let q = query(r#"{"origin": "  ", "dest": "", "nowMinutes": " "}"#);
        assert_eq!(q.origin(), None);
        assert_eq!(q.dest(), None);
        assert_eq!(q.now_minutes(), Ok(None));
    }

    #[test]
    fn query_rejects_out_of_range_time() {
        assert!(query(r#"{"nowMinutes": "1440"}"#).now_minutes().is_err());
        assert!(query(r#"{"nowMinutes": "-1"}"#).now_minutes().is_err());
        assert!(query(r#"{"nowMinutes": "NaN"}"#).now_minutes().is_err());
        assert!(query(r#"{"nowMinutes": "noon"}"#).now_minutes().is_err());
    }

    #[test]
    fn candidate_serializes_camel_case() {
        let candidate = TripCandidate {
            trip_id: "T1".into(),
            route_id: Some("R1".into()),
            route_display_name: Some("5".into()),
            origin_time: time("10:00:00"),
            dest_time: Some(time("10:20:00")),
            delta_minutes: 40,
            origin_sequence: StopSequence(1),
            dest_sequence: StopSequence(2),
            is_active: true,
        };

        let value = serde_json::to_value(SuggestionResult::Direct(CandidateResult::from_candidate(
            &candidate,
        )))
        .unwrap();

        assert_eq!(
            value,
            json!({
                "tripId": "T1",
                "routeId": "R1",
                "route": "5",
                "originTime": "10:00",
                "destTime": "10:20",
                "deltaMinutes": 40,
                "originSeq": 1,
                "destSeq": 2,
                "active": true,
            })
        );
    }

    #[test]
    fn fallback_response_shape() {
        let resolution = Resolution {
            suggestions: Suggestions::Fallback(vec![NextDeparture {
                trip_id: "T1".into(),
                route_id: None,
                origin_time: time("25:05:00"),
                delta_minutes: 5,
            }]),
            diagnostics: Diagnostics {
                trips_with_origin: 1,
                trips_with_dest: 0,
                sample_origin: Some(sample_entry()),
                sample_dest: None,
            },
        };

        let value = serde_json::to_value(RouteCandidatesResponse::from_resolution(&resolution)).unwrap();

        assert_eq!(value["fallback"], json!(true));
        assert_eq!(
            value["candidates"],
            json!([{"tripId": "T1", "routeId": null, "originTime": "25:05", "deltaMinutes": 5}])
        );
        assert_eq!(value["diagnostics"]["tripsWithOrigin"], json!(1));
        assert_eq!(value["diagnostics"]["sampleOrigin"]["departureTime"], json!("10:00"));
        assert_eq!(value["diagnostics"]["sampleOrigin"]["arrivalTime"], json!(null));
        assert_eq!(value["diagnostics"]["sampleDest"], json!(null));
    }

    #[test]
    fn stop_serializes_snake_case() {
        let stop = Stop {
            id: "S1".into(),
            name: "Main St".into(),
            latitude: 1.5,
            longitude: -2.25,
        };
        let value = serde_json::to_value(StopsResponse {
            stops: vec![StopResult::from_stop(&stop)],
        })
        .unwrap();

        assert_eq!(
            value,
            json!({"stops": [{"stop_id": "S1", "name": "Main St", "latitude": 1.5, "longitude": -2.25}]})
        );
    }
}
