//! Port adapters
//!
//! Bridge the application ports to the integration clients and to local
//! implementations such as password hashing.

mod geocoding_adapter;
mod password_hasher;
mod routing_adapter;

pub use geocoding_adapter::NominatimGeocodingAdapter;
pub use password_hasher::Argon2PasswordHasher;
pub use routing_adapter::OsrmRoutingAdapter;
