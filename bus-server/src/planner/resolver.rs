//! Trip resolver: direct matches, realtime priority, and fallback.
//!
//! Each call is independent and reads only its arguments, so one schedule
//! snapshot can serve any number of concurrent resolutions.

use chrono::Local;
use tracing::debug;

use crate::domain::{StopTimeEntry, minutes_since_midnight};
use crate::realtime::ActiveTripSet;
use crate::schedule::ScheduleIndex;

use super::config::ResolverConfig;
use super::fallback::{NextDeparture, next_departures};
use super::matcher::{TripCandidate, find_candidates};
use super::rank::prioritize_active;

/// Request to resolve trips between two stops.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub origin_stop_id: String,
    pub dest_stop_id: String,
    /// Requested number of results; `None` or zero uses the configured default.
    pub max_results: Option<usize>,
    /// Minutes since local midnight to plan from; `None` uses the clock.
    pub now_minutes: Option<f64>,
}

impl ResolveRequest {
    /// Create a request planning from the current time with default limits.
    pub fn new(origin_stop_id: impl Into<String>, dest_stop_id: impl Into<String>) -> Self {
        Self {
            origin_stop_id: origin_stop_id.into(),
            dest_stop_id: dest_stop_id.into(),
            max_results: None,
            now_minutes: None,
        }
    }

    /// Set the number of results.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Plan from a fixed time instead of the clock.
    pub fn at(mut self, now_minutes: f64) -> Self {
        self.now_minutes = Some(now_minutes);
        self
    }
}

/// What the resolver suggests.
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestions {
    /// Trips running from origin to destination.
    Direct(Vec<TripCandidate>),
    /// No trip runs through; next departures from the origin instead.
    Fallback(Vec<NextDeparture>),
}

/// Counts that help explain an empty or unexpected answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Trips calling at the origin stop.
    pub trips_with_origin: usize,
    /// Trips calling at the destination stop.
    pub trips_with_dest: usize,
    /// First call seen at the origin stop.
    pub sample_origin: Option<StopTimeEntry>,
    /// First call seen at the destination stop.
    pub sample_dest: Option<StopTimeEntry>,
}

impl Diagnostics {
    /// Tally how many trips serve each stop.
    pub fn collect(index: &ScheduleIndex, origin_stop_id: &str, dest_stop_id: &str) -> Self {
        let mut diagnostics = Self::default();
        for trip in index.trips() {
            let mut has_origin = false;
            let mut has_dest = false;
            for entry in &trip.stop_times {
                if entry.stop_id == origin_stop_id {
                    has_origin = true;
                    diagnostics.sample_origin.get_or_insert_with(|| entry.clone());
                }
                if entry.stop_id == dest_stop_id {
                    has_dest = true;
                    diagnostics.sample_dest.get_or_insert_with(|| entry.clone());
                }
            }
            diagnostics.trips_with_origin += usize::from(has_origin);
            diagnostics.trips_with_dest += usize::from(has_dest);
        }
        diagnostics
    }
}

/// Result of one resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub suggestions: Suggestions,
    pub diagnostics: Diagnostics,
}

impl Resolution {
    /// True if no direct trip was found and fallback departures were used.
    pub fn is_fallback(&self) -> bool {
        matches!(self.suggestions, Suggestions::Fallback(_))
    }

    /// Number of suggestions returned.
    pub fn len(&self) -> usize {
        match &self.suggestions {
            Suggestions::Direct(c) => c.len(),
            Suggestions::Fallback(d) => d.len(),
        }
    }

    /// True if there is nothing to suggest.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stateless trip resolver over one schedule snapshot.
pub struct Resolver<'a> {
    index: &'a ScheduleIndex,
    config: &'a ResolverConfig,
}

impl<'a> Resolver<'a> {
    /// Create a new resolver.
    pub fn new(index: &'a ScheduleIndex, config: &'a ResolverConfig) -> Self {
        Self { index, config }
    }

    /// Suggest trips from origin to destination.
    ///
    /// Direct trips come first, with live trips from `active` ahead of the
    /// rest. Only when no direct trip exists does the resolver fall back to
    /// the next departures from the origin. Never fails: an empty schedule
    /// simply yields no suggestions.
    pub fn resolve(&self, request: &ResolveRequest, active: &ActiveTripSet) -> Resolution {
        let now_minutes = request.now_minutes.unwrap_or_else(current_minutes);
        let limit = self.config.result_limit(request.max_results);
        let diagnostics =
            Diagnostics::collect(self.index, &request.origin_stop_id, &request.dest_stop_id);

        let candidates = find_candidates(
            &request.origin_stop_id,
            &request.dest_stop_id,
            self.index,
            now_minutes,
        );

        let suggestions = if candidates.is_empty() {
            let mut departures = next_departures(&request.origin_stop_id, self.index, now_minutes);
            departures.truncate(limit);
            debug!(
                origin = %request.origin_stop_id,
                dest = %request.dest_stop_id,
                trips_with_origin = diagnostics.trips_with_origin,
                trips_with_dest = diagnostics.trips_with_dest,
                sample_origin = ?diagnostics.sample_origin,
                sample_dest = ?diagnostics.sample_dest,
                departures = departures.len(),
                "no direct trip, using next departures"
            );
            Suggestions::Fallback(departures)
        } else {
            let mut candidates = prioritize_active(candidates, active);
            candidates.truncate(limit);
            Suggestions::Direct(candidates)
        };

        Resolution {
            suggestions,
            diagnostics,
        }
    }
}

/// Minutes since local midnight, now.
fn current_minutes() -> f64 {
    minutes_since_midnight(Local::now().time())
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
