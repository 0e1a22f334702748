//! Routing adapter - Implements RoutingPort using integration_routing

use application::{
    error::ApplicationError,
    ports::{RouterResponse, RoutingPort},
};
use async_trait::async_trait;
use domain::{GeoLocation, RouteCandidate};
use integration_routing::{
    OsrmResponse, OsrmRoutingClient, RoutingClient, RoutingConfig,
};
use tracing::{instrument, warn};

/// Adapter exposing the OSRM client as a [`RoutingPort`]
#[derive(Debug)]
pub struct OsrmRoutingAdapter {
    client: OsrmRoutingClient,
}

impl OsrmRoutingAdapter {
    pub const fn new(client: OsrmRoutingClient) -> Self {
        Self { client }
    }

    /// Build the adapter and its HTTP client from configuration
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the client cannot be built.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, ApplicationError> {
        OsrmRoutingClient::new(config)
            .map(Self::new)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))
    }

    /// Map the OSRM body to the port's response
    ///
    /// A failed response without a message reports the OSRM code instead.
    fn convert_response(response: OsrmResponse) -> RouterResponse {
        let ok = response.is_ok();
        let message = if ok {
            response.message
        } else {
            response.message.or(Some(response.code))
        };
        let routes = response.routes.map(|routes| {
            routes
                .into_iter()
                .map(|r| RouteCandidate::new(r.duration, r.distance, r.geometry))
                .collect()
        });
        RouterResponse {
            ok,
            message,
            routes,
        }
    }
}

#[async_trait]
impl RoutingPort for OsrmRoutingAdapter {
    #[instrument(skip(self))]
    async fn route(
        &self,
        origin: &GeoLocation,
        destination: &GeoLocation,
    ) -> Result<RouterResponse, ApplicationError> {
        self.client
            .route(origin, destination)
            .await
            .map(Self::convert_response)
            .map_err(|e| {
                warn!(error = %e, "Routing request failed");
                ApplicationError::RoutingFailure(Some(e.to_string()))
            })
    }
}
