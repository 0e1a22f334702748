//! Geocoding port
//!
//! Resolves free-text place names to coordinates.

use async_trait::async_trait;
use domain::Location;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for forward geocoding
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search for a place
    ///
    /// Returns matches in relevance order. An empty vector means the geocoder
    /// answered but found nothing; it is not an error.
    async fn search(&self, query: &str) -> Result<Vec<Location>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn GeocodingPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn GeocodingPort>();
    }
}
