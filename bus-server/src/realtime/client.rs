//! GTFS-Realtime HTTP client.
//!
//! Fetches an agency's vehicle-positions feed and decodes it into a [`Feed`].
//! Each fetch is a single attempt with a short timeout.

use std::time::Duration;

use tracing::debug;

use super::error::RealtimeError;
use super::feed::Feed;

/// Default base URL for the realtime feed proxy.
const DEFAULT_BASE_URL: &str = "https://api.ottop.org/realtime";

/// Default largest accepted feed payload (50 MiB).
const DEFAULT_MAX_BYTES: usize = 50 * 1024 * 1024;

/// Configuration for the realtime client.
#[derive(Debug, Clone)]
pub struct RealtimeConfig {
    /// Base URL; feeds live at `{base_url}/{agency}/vehiclePositions`
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Largest accepted payload in bytes
    pub max_bytes: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl RealtimeConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the payload size limit.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

/// Client for an agency's GTFS-Realtime vehicle-positions feed.
#[derive(Debug, Clone)]
pub struct RealtimeClient {
    http: reqwest::Client,
    base_url: String,
    max_bytes: usize,
}

impl RealtimeClient {
    /// Create a new realtime client with the given configuration.
    pub fn new(config: RealtimeConfig) -> Result<Self, RealtimeError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            max_bytes: config.max_bytes,
        })
    }

    /// URL of an agency's vehicle-positions feed.
    pub fn vehicle_positions_url(&self, agency: &str) -> String {
        format!("{}/{}/vehiclePositions", self.base_url, agency)
    }

    /// Fetch and decode an agency's vehicle positions.
    pub async fn fetch_vehicle_positions(&self, agency: &str) -> Result<Feed, RealtimeError> {
        let url = self.vehicle_positions_url(agency);
        let mut response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RealtimeError::Status {
                status: status.as_u16(),
            });
        }

        if let Some(size) = response.content_length() {
            check_size(usize::try_from(size).unwrap_or(usize::MAX), self.max_bytes)?;
        }

        // The declared length may be absent or wrong, so cap the read too
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            check_size(body.len() + chunk.len(), self.max_bytes)?;
            body.extend_from_slice(&chunk);
        }

        let feed = Feed::decode(&body)?;
        debug!(agency, entities = feed.entities.len(), "decoded realtime feed");
        Ok(feed)
    }
}

fn check_size(size: usize, max: usize) -> Result<(), RealtimeError> {
    if size > max {
        return Err(RealtimeError::TooLarge { size, max });
    }
    Ok(())
}
