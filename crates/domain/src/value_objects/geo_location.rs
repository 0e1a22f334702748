//! Geographic coordinate value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A validated latitude/longitude pair
///
/// Serialized as `{"lat": .., "lon": ..}`, the shape both the geocoder and
/// the dashboard use. Deserializing applies the same range checks as
/// [`GeoLocation::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoLocation")]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    #[serde(rename = "lat")]
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    #[serde(rename = "lon")]
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoLocation {
    #[serde(rename = "lat", alias = "latitude")]
    latitude: f64,
    #[serde(rename = "lon", alias = "longitude")]
    longitude: f64,
}

impl TryFrom<RawGeoLocation> for GeoLocation {
    type Error = DomainError;

    fn try_from(raw: RawGeoLocation) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoLocation {
    /// Create a new coordinate pair with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in
    /// [-90, 90] or longitude is not in [-180, 180]. NaN is rejected too.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Format as `lon,lat`, the coordinate order used in OSRM paths
    #[must_use]
    pub fn to_lon_lat(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_coordinates() {
        let loc = GeoLocation::new(52.52, 13.405).expect("valid coordinates");
        assert!((loc.latitude() - 52.52).abs() < f64::EPSILON);
        assert!((loc.longitude() - 13.405).abs() < f64::EPSILON);
    }

    #[test]
    fn boundary_coordinates() {
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(GeoLocation::new(91.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, -181.0).is_err());
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn lon_lat_order() {
        let loc = GeoLocation::new(1.0, 2.0).expect("valid");
        assert_eq!(loc.to_lon_lat(), "2,1");
    }

    #[test]
    fn serializes_as_lat_lon() {
        let loc = GeoLocation::new(-1.2921, 36.8219).expect("valid");
        let json = serde_json::to_value(loc).expect("serialize");
        assert_eq!(json["lat"], -1.2921);
        assert_eq!(json["lon"], 36.8219);
    }

    #[test]
    fn deserializes_long_field_names() {
        let loc: GeoLocation =
            serde_json::from_str(r#"{"latitude": 3.0, "longitude": 4.0}"#).expect("deserialize");
        assert!((loc.latitude() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deserialization_validates_range() {
        let err = serde_json::from_str::<GeoLocation>(r#"{"lat": 500, "lon": -999}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid coordinates"));
        assert!(serde_json::from_str::<GeoLocation>(r#"{"lat": 10, "lon": 181}"#).is_err());
    }
}
