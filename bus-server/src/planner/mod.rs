//! Trip candidate resolver.
//!
//! This module answers: "which upcoming buses take me from this stop to
//! that one?" It scans every trip in the schedule for the origin and
//! destination calls, ranks the matches by time to departure with live
//! trips first, and falls back to plain next departures from the origin
//! when no single trip connects the two stops.

mod config;
mod fallback;
mod matcher;
mod rank;
mod resolver;

pub use config::ResolverConfig;
pub use fallback::{NextDeparture, next_departures};
pub use matcher::{TripCandidate, find_candidates};
pub use rank::{prioritize_active, rank_by_departure};
pub use resolver::{Diagnostics, ResolveRequest, Resolution, Resolver, Suggestions};
