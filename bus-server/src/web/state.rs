//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::ResolverConfig;
use crate::realtime::CachedRealtimeClient;
use crate::schedule::ScheduleStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Current schedule snapshot
    pub schedule: ScheduleStore,

    /// Cached realtime feed client
    pub realtime: Arc<CachedRealtimeClient>,

    /// Resolver configuration
    pub config: Arc<ResolverConfig>,

    /// Agency used when a request does not name one
    pub default_agency: Arc<str>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        schedule: ScheduleStore,
        realtime: CachedRealtimeClient,
        config: ResolverConfig,
        default_agency: &str,
    ) -> Self {
        Self {
            schedule,
            realtime: Arc::new(realtime),
            config: Arc::new(config),
            default_agency: Arc::from(default_agency),
        }
    }
}
