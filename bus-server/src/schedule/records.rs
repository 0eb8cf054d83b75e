//! Raw GTFS table rows and their normalization.
//!
//! Every column is read as text with a blank default, so a short or sparse
//! row still deserializes. Normalization into domain types happens here,
//! once, at the loading boundary.

use serde::Deserialize;

use crate::domain::{ScheduleTime, Stop, StopSequence, StopTimeEntry};

/// A row of `stop_times.txt`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StopTimeRecord {
    pub trip_id: String,
    pub stop_id: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub stop_sequence: String,
}

/// A row of `trips.txt`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TripRecord {
    pub trip_id: String,
    pub route_id: String,
}

/// A row of `routes.txt`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RouteRecord {
    pub route_id: String,
    pub route_short_name: String,
    pub route_long_name: String,
}

/// A row of `stops.txt`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StopRecord {
    pub stop_id: String,
    pub stop_code: String,
    pub stop_name: String,
    pub stop_desc: String,
    pub stop_lat: String,
    pub stop_lon: String,
}

/// Counts of rows skipped or partly unreadable while building an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Stop-time rows read.
    pub stop_time_rows: usize,
    /// Stop-time rows dropped for having no trip id.
    pub missing_trip_id: usize,
    /// Stop-time rows whose sequence was not a number.
    pub bad_sequence: usize,
    /// Time fields that could not be parsed and were treated as absent.
    pub bad_time: usize,
    /// Stop rows dropped for lacking an id or coordinates.
    pub unplaceable_stops: usize,
}

impl BuildReport {
    /// True if nothing was skipped or degraded.
    pub fn is_clean(&self) -> bool {
        self.missing_trip_id == 0
            && self.bad_sequence == 0
            && self.bad_time == 0
            && self.unplaceable_stops == 0
    }
}

impl StopTimeRecord {
    /// Normalize into a stop-time entry.
    ///
    /// Returns `None` for rows without a trip id. Unreadable times become
    /// absent and an unreadable sequence becomes the non-numeric sentinel;
    /// both are tallied in `report`.
    pub fn normalize(self, report: &mut BuildReport) -> Option<StopTimeEntry> {
        report.stop_time_rows += 1;

        let trip_id = self.trip_id.trim();
        if trip_id.is_empty() {
            report.missing_trip_id += 1;
            return None;
        }

        let stop_sequence = StopSequence::parse(&self.stop_sequence);
        if stop_sequence.is_none() {
            report.bad_sequence += 1;
        }

        Some(StopTimeEntry {
            trip_id: trip_id.to_string(),
            stop_id: self.stop_id.trim().to_string(),
            arrival_time: optional_time(&self.arrival_time, report),
            departure_time: optional_time(&self.departure_time, report),
            stop_sequence,
        })
    }
}

impl StopRecord {
    /// Normalize into a stop, or `None` if it has no id or no position.
    ///
    /// The id falls back to `stop_code` and the name to `stop_desc`.
    pub fn normalize(self) -> Option<Stop> {
        let id = first_non_blank(&self.stop_id, &self.stop_code)?;
        let name = first_non_blank(&self.stop_name, &self.stop_desc).unwrap_or_default();
        let latitude = self.stop_lat.trim().parse::<f64>().ok()?;
        let longitude = self.stop_lon.trim().parse::<f64>().ok()?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }

        Some(Stop {
            id,
            name,
            latitude,
            longitude,
        })
    }
}

fn optional_time(field: &str, report: &mut BuildReport) -> Option<ScheduleTime> {
    if field.trim().is_empty() {
        return None;
    }
    match ScheduleTime::parse(field) {
        Ok(time) => Some(time),
        Err(_) => {
            report.bad_time += 1;
            None
        }
    }
}

fn first_non_blank(a: &str, b: &str) -> Option<String> {
    [a.trim(), b.trim()]
        .into_iter()
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_time(trip: &str, arr: &str, dep: &str, seq: &str) -> StopTimeRecord {
        StopTimeRecord {
            trip_id: trip.into(),
            stop_id: " A ".into(),
            arrival_time: arr.into(),
            departure_time: dep.into(),
            stop_sequence: seq.into(),
        }
    }

    #[test]
    fn normalize_complete_row() {
        let mut report = BuildReport::default();
        let entry = stop_time("T1", "10:00:00", "10:01:00", "4")
            .normalize(&mut report)
            .unwrap();

        assert_eq!(entry.trip_id, "T1");
        assert_eq!(entry.stop_id, "A");
        assert_eq!(entry.arrival_time.unwrap().to_string(), "10:00");
        assert_eq!(entry.departure_time.unwrap().to_string(), "10:01");
        assert_eq!(entry.stop_sequence, Some(StopSequence(4)));
        assert!(report.is_clean());
        assert_eq!(report.stop_time_rows, 1);
    }

    #[test]
    fn missing_trip_id_is_skipped() {
        let mut report = BuildReport::default();
        assert!(stop_time("  ", "10:00:00", "", "1").normalize(&mut report).is_none());
        assert_eq!(report.missing_trip_id, 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn bad_sequence_becomes_sentinel() {
        let mut report = BuildReport::default();
        let entry = stop_time("T1", "10:00:00", "", "first")
            .normalize(&mut report)
            .unwrap();
        assert_eq!(entry.stop_sequence, None);
        assert_eq!(report.bad_sequence, 1);
    }

    #[test]
    fn blank_time_is_absent_without_complaint() {
        let mut report = BuildReport::default();
        let entry = stop_time("T1", "", "10:00:00", "1")
            .normalize(&mut report)
            .unwrap();
        assert_eq!(entry.arrival_time, None);
        assert!(report.is_clean());
    }

    #[test]
    fn bad_time_is_absent_and_counted() {
        let mut report = BuildReport::default();
        let entry = stop_time("T1", "soon", "10:00:00", "1")
            .normalize(&mut report)
            .unwrap();
        assert_eq!(entry.arrival_time, None);
        assert_eq!(report.bad_time, 1);
    }

    #[test]
    fn stop_falls_back_to_code_and_description() {
        let record = StopRecord {
            stop_code: "1042".into(),
            stop_desc: "Opposite the library".into(),
            stop_lat: "51.5".into(),
            stop_lon: "-0.12".into(),
            ..Default::default()
        };
        let stop = record.normalize().unwrap();
        assert_eq!(stop.id, "1042");
        assert_eq!(stop.name, "Opposite the library");
        assert_eq!(stop.latitude, 51.5);
        assert_eq!(stop.longitude, -0.12);
    }

    #[test]
    fn stop_without_position_is_dropped() {
        let record = StopRecord {
            stop_id: "S1".into(),
            stop_name: "Nowhere".into(),
            stop_lat: "51.5".into(),
            ..Default::default()
        };
        assert!(record.normalize().is_none());
    }

    #[test]
    fn stop_without_id_is_dropped() {
        let record = StopRecord {
            stop_lat: "51.5".into(),
            stop_lon: "0.1".into(),
            ..Default::default()
        };
        assert!(record.normalize().is_none());
    }
}
