//! OSRM route service response models

use serde::{Deserialize, Serialize};

/// The `code` OSRM returns on success
pub const OSRM_OK: &str = "Ok";

/// Body of an OSRM `/route` response
///
/// Error responses (`InvalidQuery`, `NoRoute`, ...) share this shape with
/// `routes` absent and a human-readable `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsrmResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Option<Vec<OsrmRoute>>,
    #[serde(default)]
    pub waypoints: Vec<OsrmWaypoint>,
}

impl OsrmResponse {
    /// Whether OSRM reported success
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == OSRM_OK
    }
}

/// One route alternative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsrmRoute {
    /// Seconds
    pub duration: f64,
    /// Meters
    pub distance: f64,
    /// GeoJSON `LineString` when requested with `geometries=geojson`
    #[serde(default)]
    pub geometry: serde_json::Value,
    #[serde(default)]
    pub weight_name: Option<String>,
}

/// Input coordinate snapped to the road network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsrmWaypoint {
    /// Street name, often empty
    #[serde(default)]
    pub name: String,
    /// `[lon, lat]`
    pub location: [f64; 2],
}
