//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Caller supplied empty or malformed input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The geocoder answered but had no match for a place
    #[error("Geocoding failed for '{query}': {reason}")]
    GeocodeFailure { query: String, reason: String },

    /// The geocoder errored or timed out while resolving a place
    #[error("Geocoder unavailable for '{query}': {reason}")]
    GeocoderUnavailable { query: String, reason: String },

    /// The router reported an error or returned no route list
    #[error("Routing failed{}", .0.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    RoutingFailure(Option<String>),

    /// The router succeeded but found no route between the two points
    #[error("No route found")]
    NoRouteFound,

    /// User not authorized
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Resource already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Create a geocode failure for the given query text
    pub fn geocode_failure(query: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::GeocodeFailure {
            query: query.into(),
            reason: reason.into(),
        }
    }

    /// Create a geocoder outage error for the given query text
    pub fn geocoder_unavailable(query: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::GeocoderUnavailable {
            query: query.into(),
            reason: reason.into(),
        }
    }
}
