//! Geocoding and road routing clients
//!
//! Address lookup goes through [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org)
//! and route computation through an [OSRM](https://project-osrm.org) server.
//!
//! # Architecture
//!
//! Each upstream has a client trait and one HTTP implementation:
//! [`GeocodingClient`] / [`NominatimGeocodingClient`] and
//! [`RoutingClient`] / [`OsrmRoutingClient`]. Both clients are cheap to share
//! behind an `Arc` and safe to call concurrently.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_routing::{OsrmRoutingClient, RoutingClient, RoutingConfig};
//!
//! let client = OsrmRoutingClient::new(&RoutingConfig::default())?;
//! let response = client.route(&nairobi_cbd, &westlands).await?;
//! if response.is_ok() {
//!     println!("{} alternatives", response.routes.unwrap_or_default().len());
//! }
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;

pub use client::{OsrmRoutingClient, RoutingClient};
pub use config::RoutingConfig;
pub use error::RoutingError;
pub use geocoding::{GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient};
pub use models::{OSRM_OK, OsrmResponse, OsrmRoute, OsrmWaypoint};
