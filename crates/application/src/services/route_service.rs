//! Route lookup service
//!
//! Geocodes two place names, asks the router for alternatives and picks the
//! fastest one. Every outbound call is bounded by a timeout; dropping the
//! returned future cancels whatever calls are still in flight.

use std::{fmt, sync::Arc, time::Duration};

use domain::{Location, Place, RouteResult};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{GeocodingPort, RouterResponse, RoutingPort},
};

/// Default bound for each geocoding or routing call
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves a pair of place names into a [`RouteResult`]
///
/// Holds no per-request state, so one instance is shared by all requests.
#[derive(Clone)]
pub struct RouteService {
    geocoder: Arc<dyn GeocodingPort>,
    router: Arc<dyn RoutingPort>,
    call_timeout: Duration,
}

impl fmt::Debug for RouteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteService")
            .field("call_timeout", &self.call_timeout)
            .finish_non_exhaustive()
    }
}

impl RouteService {
    /// Create a new route service with the default call timeout
    pub fn new(geocoder: Arc<dyn GeocodingPort>, router: Arc<dyn RoutingPort>) -> Self {
        Self {
            geocoder,
            router,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Override the per-call timeout
    #[must_use]
    pub const fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Resolve `origin` and `destination` and select the fastest route
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if either text is empty after trimming; no external
    ///   call is made in that case
    /// - `GeocodeFailure` naming the first (origin before destination) text
    ///   the geocoder had no match for
    /// - `GeocoderUnavailable` if the geocoder errored or timed out for that text
    /// - `RoutingFailure` if the router errored, timed out or sent no route list
    /// - `NoRouteFound` if the router succeeded with zero routes
    #[instrument(skip(self))]
    pub async fn resolve_route(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<RouteResult, ApplicationError> {
        let origin = Place::parse(origin)
            .map_err(|_| ApplicationError::InvalidInput("origin must not be empty".into()))?;
        let destination = Place::parse(destination).map_err(|_| {
            ApplicationError::InvalidInput("destination must not be empty".into())
        })?;

        let (from, to) = tokio::join!(self.geocode(&origin), self.geocode(&destination));
        let from = from?;
        let to = to?;
        debug!(
            origin = %from.coordinates(),
            destination = %to.coordinates(),
            "Both places geocoded"
        );

        let response = timeout(
            self.call_timeout,
            self.router.route(&from.coordinates(), &to.coordinates()),
        )
        .await
        .map_err(|_| {
            warn!(timeout = ?self.call_timeout, "Routing request timed out");
            ApplicationError::RoutingFailure(Some("routing request timed out".into()))
        })?
        .map_err(into_routing_failure)?;

        let candidates = match response {
            RouterResponse {
                ok: true,
                routes: Some(routes),
                ..
            } => routes,
            RouterResponse { message, .. } => {
                return Err(ApplicationError::RoutingFailure(message));
            },
        };
        if candidates.is_empty() {
            return Err(ApplicationError::NoRouteFound);
        }

        let result = RouteResult::new(from, to, candidates)?;
        debug!(
            candidates = result.candidates().len(),
            best_index = result.best_index(),
            "Route selected"
        );
        Ok(result)
    }

    /// Geocode a single place, keeping only the first match
    async fn geocode(&self, place: &Place) -> Result<Location, ApplicationError> {
        let query = place.as_str();
        let matches = timeout(self.call_timeout, self.geocoder.search(query))
            .await
            .map_err(|_| {
                warn!(query, "Geocoding request timed out");
                ApplicationError::geocoder_unavailable(query, "geocoding request timed out")
            })?
            .map_err(|e| match e {
                ApplicationError::GeocodeFailure { .. }
                | ApplicationError::GeocoderUnavailable { .. } => e,
                other => ApplicationError::geocoder_unavailable(query, other.to_string()),
            })?;

        matches
            .into_iter()
            .next()
            .ok_or_else(|| ApplicationError::geocode_failure(query, "no match"))
    }
}

fn into_routing_failure(err: ApplicationError) -> ApplicationError {
    match err {
        ApplicationError::RoutingFailure(_) => err,
        other => ApplicationError::RoutingFailure(Some(other.to_string())),
    }
}
