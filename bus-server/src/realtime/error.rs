//! Realtime feed error types.

/// Errors from fetching or decoding a GTFS-Realtime feed.
///
/// None of these are fatal to a trip search: callers fall back to ranking by
/// the static schedule alone.
#[derive(Debug, thiserror::Error)]
pub enum RealtimeError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status
    #[error("upstream responded with status {status}")]
    Status { status: u16 },

    /// Payload exceeds the configured limit
    #[error("feed too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: usize, max: usize },

    /// Payload is not a valid GTFS-Realtime message
    #[error("failed to decode feed: {0}")]
    Decode(#[from] prost::DecodeError),
}
