//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::realtime::{CacheConfig, RealtimeConfig};

/// Agency whose realtime feed is used when a request names none.
pub const DEFAULT_AGENCY: &str = "7011501003070";

/// Server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory holding the GTFS tables.
    pub gtfs_dir: PathBuf,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub realtime_base_url: String,
    pub default_agency: String,
    pub realtime_timeout: Duration,
    pub realtime_cache_ttl: Duration,
    /// How often the schedule is reloaded from `gtfs_dir`.
    pub schedule_refresh: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            gtfs_dir: PathBuf::from("public/gtfs"),
            static_dir: PathBuf::from("public"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            realtime_base_url: RealtimeConfig::default().base_url,
            default_agency: DEFAULT_AGENCY.to_string(),
            realtime_timeout: Duration::from_secs(5),
            realtime_cache_ttl: Duration::from_secs(15),
            schedule_refresh: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl ServerConfig {
    /// Read settings from environment variables, using defaults for any
    /// that are unset or unreadable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its
    /// value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        Self {
            gtfs_dir: PathBuf::from(text("GTFS_DIR", defaults.gtfs_dir.display().to_string())),
            static_dir: PathBuf::from(text(
                "STATIC_DIR",
                defaults.static_dir.display().to_string(),
            )),
            bind_addr: parsed(&lookup, "BIND_ADDR", defaults.bind_addr),
            realtime_base_url: text("REALTIME_BASE_URL", defaults.realtime_base_url),
            default_agency: text("DEFAULT_AGENCY", defaults.default_agency),
            realtime_timeout: seconds(&lookup, "REALTIME_TIMEOUT_SECS", defaults.realtime_timeout),
            realtime_cache_ttl: seconds(
                &lookup,
                "REALTIME_CACHE_TTL_SECS",
                defaults.realtime_cache_ttl,
            ),
            schedule_refresh: seconds(&lookup, "SCHEDULE_REFRESH_SECS", defaults.schedule_refresh),
        }
    }

    /// Realtime client settings.
    pub fn realtime(&self) -> RealtimeConfig {
        RealtimeConfig::default()
            .with_base_url(&self.realtime_base_url)
            .with_timeout(self.realtime_timeout)
    }

    /// Realtime cache settings.
    pub fn cache(&self) -> CacheConfig {
        CacheConfig {
            ttl: self.realtime_cache_ttl,
            ..CacheConfig::default()
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable setting, using default");
            default
        }
    }
}

fn seconds(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: Duration) -> Duration {
    let secs = parsed(lookup, key, default.as_secs());
    if secs == 0 {
        warn!(key, "setting must be positive, using default");
        return default;
    }
    Duration::from_secs(secs)
}
