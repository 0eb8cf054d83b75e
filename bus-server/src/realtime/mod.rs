//! GTFS-Realtime support.
//!
//! The resolver only needs to know which trips are live. This module fetches
//! an agency's vehicle-positions feed, decodes it into a small typed view,
//! and reduces it to an [`ActiveTripSet`]. Every failure along the way
//! degrades to an empty set rather than an error.

mod cache;
mod client;
mod error;
mod feed;
mod overlay;

pub use cache::{CacheConfig, CachedRealtimeClient};
pub use client::{RealtimeClient, RealtimeConfig};
pub use error::RealtimeError;
pub use feed::{Feed, FeedEntity, TripRef, TripUpdate, VehiclePosition};
pub use overlay::{ActiveTripSet, active_trip_ids};
