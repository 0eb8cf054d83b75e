//! Realtime activity overlay: which scheduled trips are live right now.

use std::collections::HashSet;

use super::feed::Feed;

/// Trip ids that have a live vehicle or a trip update in one feed snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveTripSet(HashSet<String>);

impl ActiveTripSet {
    /// A set with no active trips.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Collect every trip referenced by a vehicle position or a trip update.
    pub fn from_feed(feed: &Feed) -> Self {
        let mut active = HashSet::new();
        for entity in &feed.entities {
            let vehicle_trip = entity
                .vehicle
                .as_ref()
                .and_then(|v| v.trip.as_ref())
                .and_then(|t| t.trip_id.as_deref());
            let update_trip = entity
                .trip_update
                .as_ref()
                .and_then(|u| u.trip.trip_id.as_deref());

            for trip_id in [vehicle_trip, update_trip].into_iter().flatten() {
                if !trip_id.is_empty() {
                    active.insert(trip_id.to_string());
                }
            }
        }
        Self(active)
    }

    /// True if `trip_id` is live.
    pub fn contains(&self, trip_id: &str) -> bool {
        self.0.contains(trip_id)
    }

    /// Number of active trips.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no trip is active.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for ActiveTripSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Active trips in `feed`; an absent feed has none.
pub fn active_trip_ids(feed: Option<&Feed>) -> ActiveTripSet {
    feed.map(ActiveTripSet::from_feed).unwrap_or_default()
}
