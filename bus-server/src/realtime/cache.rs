//! Caching layer for realtime activity.
//!
//! Vehicle positions change every few seconds but many requests arrive in
//! that time, so the active-trip set for each agency is cached for a short
//! TTL. Failed fetches are not cached, so the next request retries.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::{debug, warn};

use super::client::RealtimeClient;
use super::overlay::ActiveTripSet;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached agencies.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15),
            max_capacity: 100,
        }
    }
}

/// Realtime client with per-agency caching of active trips.
pub struct CachedRealtimeClient {
    client: RealtimeClient,
    active: MokaCache<String, Arc<ActiveTripSet>>,
}

impl CachedRealtimeClient {
    /// Create a new cached client.
    pub fn new(client: RealtimeClient, config: &CacheConfig) -> Self {
        let active = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, active }
    }

    /// Active trips for `agency`, using the cache if available.
    ///
    /// Never fails: an unreachable or undecodable feed yields an empty set
    /// so the search can continue on the schedule alone.
    pub async fn active_trips(&self, agency: &str) -> Arc<ActiveTripSet> {
        if let Some(cached) = self.active.get(agency).await {
            return cached;
        }

        match self.client.fetch_vehicle_positions(agency).await {
            Ok(feed) => {
                let active = Arc::new(ActiveTripSet::from_feed(&feed));
                debug!(agency, active = active.len(), "refreshed active trips");
                self.active
                    .insert(agency.to_string(), Arc::clone(&active))
                    .await;
                active
            }
            Err(e) => {
                warn!(agency, error = %e, "realtime feed unavailable, ranking by schedule only");
                Arc::new(ActiveTripSet::empty())
            }
        }
    }

    /// Number of agencies with a cached active set.
    pub fn cache_entry_count(&self) -> u64 {
        self.active.entry_count()
    }
}
