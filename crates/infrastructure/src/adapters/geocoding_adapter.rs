//! Geocoding adapter - Implements GeocodingPort using integration_routing

use application::{error::ApplicationError, ports::GeocodingPort};
use async_trait::async_trait;
use domain::Location;
use integration_routing::{GeocodingClient, NominatimConfig, NominatimGeocodingClient};
use tracing::{instrument, warn};

/// Adapter exposing the Nominatim client as a [`GeocodingPort`]
#[derive(Debug)]
pub struct NominatimGeocodingAdapter {
    client: NominatimGeocodingClient,
}

impl NominatimGeocodingAdapter {
    pub const fn new(client: NominatimGeocodingClient) -> Self {
        Self { client }
    }

    /// Build the adapter and its HTTP client from configuration
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the client cannot be built.
    pub fn from_config(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        NominatimGeocodingClient::new(config)
            .map(Self::new)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))
    }
}

#[async_trait]
impl GeocodingPort for NominatimGeocodingAdapter {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Location>, ApplicationError> {
        self.client.search(query).await.map_err(|e| {
            warn!(%query, error = %e, "Geocoding request failed");
            ApplicationError::ExternalService(e.to_string())
        })
    }
}
