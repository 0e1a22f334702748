//! A geocoded place

use serde::{Deserialize, Serialize};

use super::GeoLocation;

/// Coordinates plus the canonical name the geocoder resolved them to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(flatten)]
    coordinates: GeoLocation,
    display_name: String,
}

impl Location {
    /// Create a location from validated coordinates
    #[must_use]
    pub fn new(coordinates: GeoLocation, display_name: impl Into<String>) -> Self {
        Self {
            coordinates,
            display_name: display_name.into(),
        }
    }

    #[must_use]
    pub const fn coordinates(&self) -> GeoLocation {
        self.coordinates
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coordinates.latitude()
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coordinates.longitude()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
