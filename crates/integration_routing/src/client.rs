//! OSRM routing client
//!
//! Requests driving routes with alternatives and full GeoJSON geometry from
//! the OSRM `/route/v1` service.

use std::time::Duration;

use async_trait::async_trait;
use domain::GeoLocation;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::{config::RoutingConfig, error::RoutingError, models::OsrmResponse};

/// Trait for routing service clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Request route alternatives from `origin` to `destination`
    ///
    /// OSRM error codes come back as `Ok` responses with `code != "Ok"`;
    /// only transport and decoding problems are `Err`.
    async fn route(
        &self,
        origin: &GeoLocation,
        destination: &GeoLocation,
    ) -> Result<OsrmResponse, RoutingError>;
}

/// HTTP client for an OSRM server
#[derive(Debug)]
pub struct OsrmRoutingClient {
    client: Client,
    config: RoutingConfig,
}

impl OsrmRoutingClient {
    /// Create a new OSRM client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &RoutingConfig) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// URL of the route service for a coordinate pair
    fn route_url(&self, origin: &GeoLocation, destination: &GeoLocation) -> String {
        format!(
            "{}/route/v1/{}/{};{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            origin.to_lon_lat(),
            destination.to_lon_lat()
        )
    }

    /// Parse a response body into the OSRM model
    fn parse_route_response(body: &str) -> Result<OsrmResponse, RoutingError> {
        serde_json::from_str(body).map_err(|e| RoutingError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl RoutingClient for OsrmRoutingClient {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn route(
        &self,
        origin: &GeoLocation,
        destination: &GeoLocation,
    ) -> Result<OsrmResponse, RoutingError> {
        let url = self.route_url(origin, destination);
        let params = [
            ("alternatives", "true"),
            ("overview", "full"),
            ("geometries", "geojson"),
        ];

        debug!(%url, "Requesting routes");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RoutingError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    RoutingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::ParseError(e.to_string()))?;

        // OSRM reports NoRoute/InvalidQuery as 4xx with a JSON body carrying
        // the message, so those are passed on as responses.
        let parsed = match Self::parse_route_response(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(RoutingError::RequestFailed(format!("HTTP {status}")));
            },
            Err(e) => return Err(e),
        };

        if parsed.is_ok() {
            debug!(
                count = parsed.routes.as_ref().map_or(0, Vec::len),
                "Routes received"
            );
        } else {
            warn!(code = %parsed.code, message = ?parsed.message, "Routing server reported an error");
        }
        Ok(parsed)
    }
}
