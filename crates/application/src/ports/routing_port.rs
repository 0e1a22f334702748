//! Routing port
//!
//! Requests driving routes, with alternatives, between two coordinates.

use async_trait::async_trait;
use domain::{GeoLocation, RouteCandidate};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// What the router answered
///
/// `ok == false` or `routes == None` is a routing failure; `ok` with an
/// empty list means the router found no route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterResponse {
    /// Whether the router reported success
    pub ok: bool,
    /// Provider message, usually present on failure
    pub message: Option<String>,
    /// Candidate routes in provider order
    pub routes: Option<Vec<RouteCandidate>>,
}

impl RouterResponse {
    /// A successful response carrying the given candidates
    #[must_use]
    pub const fn success(routes: Vec<RouteCandidate>) -> Self {
        Self {
            ok: true,
            message: None,
            routes: Some(routes),
        }
    }

    /// A failed response with the provider's message
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
            routes: None,
        }
    }
}

/// Port for route computation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Request alternatives with full geometry from `origin` to `destination`
    async fn route(
        &self,
        origin: &GeoLocation,
        destination: &GeoLocation,
    ) -> Result<RouterResponse, ApplicationError>;
}
