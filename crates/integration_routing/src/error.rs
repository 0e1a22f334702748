//! Routing error types

use thiserror::Error;

/// Errors that can occur while talking to the routing server
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Connection to the routing server failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request failed without a parseable OSRM body
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the server)
        retry_after_secs: Option<u64>,
    },

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}
