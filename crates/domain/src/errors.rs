//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// A place query was empty or whitespace only
    #[error("Invalid place: {0}")]
    InvalidPlace(String),

    /// Coordinates outside the valid latitude/longitude range
    #[error("Invalid coordinates: ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// A route result was built without any candidates
    #[error("Route result requires at least one candidate")]
    NoCandidates,

    /// A serialized route result named a best index that is not the fastest
    #[error("Best index {given} does not match the fastest candidate {expected}")]
    InvalidBestIndex { given: usize, expected: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_place_error_message() {
        let err = DomainError::InvalidPlace("origin must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid place: origin must not be empty");
    }

    #[test]
    fn invalid_coordinates_message_contains_values() {
        let err = DomainError::InvalidCoordinates {
            latitude: 91.0,
            longitude: 0.0,
        };
        assert!(err.to_string().contains("91"));
    }

    #[test]
    fn no_candidates_message() {
        assert_eq!(
            DomainError::NoCandidates.to_string(),
            "Route result requires at least one candidate"
        );
    }

    #[test]
    fn invalid_best_index_message() {
        let err = DomainError::InvalidBestIndex {
            given: 7,
            expected: 1,
        };
        assert_eq!(
            err.to_string(),
            "Best index 7 does not match the fastest candidate 1"
        );
    }
}
