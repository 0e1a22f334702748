//! Route candidates and the fastest-route selection
//!
//! A [`RouteResult`] is produced once per lookup and never mutated. The
//! candidate list keeps the router's order; only the index of the fastest
//! entry is computed.

use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::Location};

/// One alternative returned by the router
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    /// Travel time in seconds
    duration: f64,
    /// Travel distance in meters
    distance: f64,
    /// GeoJSON geometry, passed through untouched
    geometry: serde_json::Value,
}

impl RouteCandidate {
    #[must_use]
    pub const fn new(duration: f64, distance: f64, geometry: serde_json::Value) -> Self {
        Self {
            duration,
            distance,
            geometry,
        }
    }

    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    #[must_use]
    pub const fn geometry(&self) -> &serde_json::Value {
        &self.geometry
    }
}

/// Index of the candidate with the smallest duration
///
/// Single pass, strict `<`: the first of several equal minima wins and a NaN
/// duration never replaces a real one. Returns `None` for an empty slice.
///
/// ```
/// use domain::{RouteCandidate, fastest_index};
///
/// let routes = [
///     RouteCandidate::new(120.0, 1000.0, serde_json::Value::Null),
///     RouteCandidate::new(95.0, 1400.0, serde_json::Value::Null),
/// ];
/// assert_eq!(fastest_index(&routes), Some(1));
/// ```
#[must_use]
pub fn fastest_index(candidates: &[RouteCandidate]) -> Option<usize> {
    let first = candidates.first()?;
    let (best, _) = candidates.iter().enumerate().skip(1).fold(
        (0, first.duration),
        |(best, best_duration), (idx, candidate)| {
            let duration = candidate.duration;
            if !duration.is_nan() && (best_duration.is_nan() || duration < best_duration) {
                (idx, duration)
            } else {
                (best, best_duration)
            }
        },
    );
    Some(best)
}

/// Outcome of a route lookup
///
/// Deserializing goes through [`RouteResult::new`], so a payload with no
/// candidates or a `bestIndex` that is not the fastest one is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRouteResult")]
pub struct RouteResult {
    origin: Location,
    destination: Location,
    candidates: Vec<RouteCandidate>,
    best_index: usize,
}

impl RouteResult {
    /// Build a result, selecting the fastest candidate
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoCandidates` when `candidates` is empty.
    pub fn new(
        origin: Location,
        destination: Location,
        candidates: Vec<RouteCandidate>,
    ) -> Result<Self, DomainError> {
        let best_index = fastest_index(&candidates).ok_or(DomainError::NoCandidates)?;
        Ok(Self {
            origin,
            destination,
            candidates,
            best_index,
        })
    }

    #[must_use]
    pub const fn origin(&self) -> &Location {
        &self.origin
    }

    #[must_use]
    pub const fn destination(&self) -> &Location {
        &self.destination
    }

    #[must_use]
    pub fn candidates(&self) -> &[RouteCandidate] {
        &self.candidates
    }

    #[must_use]
    pub const fn best_index(&self) -> usize {
        self.best_index
    }

    /// The fastest candidate
    #[must_use]
    pub fn best(&self) -> Option<&RouteCandidate> {
        self.candidates.get(self.best_index)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRouteResult {
    origin: Location,
    destination: Location,
    candidates: Vec<RouteCandidate>,
    best_index: Option<usize>,
}

impl TryFrom<RawRouteResult> for RouteResult {
    type Error = DomainError;

    fn try_from(raw: RawRouteResult) -> Result<Self, Self::Error> {
        let result = Self::new(raw.origin, raw.destination, raw.candidates)?;
        match raw.best_index {
            Some(idx) if idx != result.best_index => Err(DomainError::InvalidBestIndex {
                given: idx,
                expected: result.best_index,
            }),
            _ => Ok(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::value_objects::GeoLocation;

    fn candidate(duration: f64) -> RouteCandidate {
        RouteCandidate::new(duration, 1000.0, json!({"type": "LineString", "coordinates": []}))
    }

    fn location(name: &str, lat: f64, lon: f64) -> Location {
        Location::new(GeoLocation::new(lat, lon).unwrap(), name)
    }

    #[test]
    fn empty_has_no_fastest() {
        assert_eq!(fastest_index(&[]), None);
    }

    #[test]
    fn single_candidate_is_fastest() {
        assert_eq!(fastest_index(&[candidate(42.0)]), Some(0));
    }

    #[test]
    fn picks_minimum_duration() {
        let routes = [candidate(300.0), candidate(180.0), candidate(240.0)];
        assert_eq!(fastest_index(&routes), Some(1));
    }

    #[test]
    fn ties_keep_first() {
        let routes = [candidate(200.0), candidate(100.0), candidate(100.0)];
        assert_eq!(fastest_index(&routes), Some(1));
    }

    #[test]
    fn distance_is_ignored() {
        let routes = [
            RouteCandidate::new(100.0, 99_999.0, json!(null)),
            RouteCandidate::new(101.0, 1.0, json!(null)),
        ];
        assert_eq!(fastest_index(&routes), Some(0));
    }

    #[test]
    fn nan_never_wins() {
        let routes = [candidate(f64::NAN), candidate(50.0), candidate(f64::NAN)];
        assert_eq!(fastest_index(&routes), Some(1));
    }

    #[test]
    fn result_keeps_provider_order() {
        let result = RouteResult::new(
            location("Point A", 1.0, 2.0),
            location("Point B", 3.0, 4.0),
            vec![candidate(120.0), candidate(95.0)],
        )
        .unwrap();

        assert_eq!(result.best_index(), 1);
        assert_eq!(result.candidates().len(), 2);
        assert!((result.candidates()[0].duration() - 120.0).abs() < f64::EPSILON);
        assert!((result.best().unwrap().duration() - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn result_requires_candidates() {
        let err = RouteResult::new(
            location("Point A", 1.0, 2.0),
            location("Point B", 3.0, 4.0),
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::NoCandidates));
    }

    #[test]
    fn result_serializes_best_index_camel_case() {
        let result = RouteResult::new(
            location("Point A", 1.0, 2.0),
            location("Point B", 3.0, 4.0),
            vec![candidate(10.0)],
        )
        .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["bestIndex"], 0);
        assert_eq!(json["origin"]["displayName"], "Point A");
        assert_eq!(json["candidates"][0]["geometry"]["type"], "LineString");
    }

    #[test]
    fn deserialize_round_trips_a_valid_result() {
        let result = RouteResult::new(
            location("Point A", 1.0, 2.0),
            location("Point B", 3.0, 4.0),
            vec![candidate(120.0), candidate(95.0)],
        )
        .unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: RouteResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn deserialize_rejects_empty_candidates() {
        let raw = json!({
            "origin": {"lat": 1.0, "lon": 2.0, "displayName": "Point A"},
            "destination": {"lat": 3.0, "lon": 4.0, "displayName": "Point B"},
            "candidates": [],
            "bestIndex": 5
        });
        let err = serde_json::from_value::<RouteResult>(raw).unwrap_err();
        assert!(err.to_string().contains("at least one candidate"));
    }

    #[test]
    fn deserialize_rejects_wrong_best_index() {
        let raw = json!({
            "origin": {"lat": 1.0, "lon": 2.0, "displayName": "Point A"},
            "destination": {"lat": 3.0, "lon": 4.0, "displayName": "Point B"},
            "candidates": [
                {"duration": 120.0, "distance": 1000.0, "geometry": null},
                {"duration": 95.0, "distance": 1400.0, "geometry": null}
            ],
            "bestIndex": 7
        });
        assert!(serde_json::from_value::<RouteResult>(raw).is_err());
    }

    #[test]
    fn deserialize_recomputes_missing_best_index() {
        let raw = json!({
            "origin": {"lat": 1.0, "lon": 2.0, "displayName": "Point A"},
            "destination": {"lat": 3.0, "lon": 4.0, "displayName": "Point B"},
            "candidates": [
                {"duration": 120.0, "distance": 1000.0, "geometry": null},
                {"duration": 95.0, "distance": 1400.0, "geometry": null}
            ]
        });
        let result: RouteResult = serde_json::from_value(raw).unwrap();
        assert_eq!(result.best_index(), 1);
        assert!(result.best().is_some());
    }

    #[test]
    fn deserialize_rejects_out_of_range_origin() {
        let raw = json!({
            "origin": {"lat": 500.0, "lon": -999.0, "displayName": "Nowhere"},
            "destination": {"lat": 3.0, "lon": 4.0, "displayName": "Point B"},
            "candidates": [{"duration": 1.0, "distance": 1.0, "geometry": null}]
        });
        assert!(serde_json::from_value::<RouteResult>(raw).is_err());
    }
}
