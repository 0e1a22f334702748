//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod account_store;
mod database_health_port;
mod geocoding_port;
mod password_hasher;
mod routing_port;

pub use account_store::AccountStore;
#[cfg(test)]
pub use account_store::MockAccountStore;
pub use database_health_port::DatabaseHealthPort;
#[cfg(test)]
pub use database_health_port::MockDatabaseHealthPort;
pub use geocoding_port::GeocodingPort;
#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use password_hasher::PasswordHasherPort;
#[cfg(test)]
pub use password_hasher::MockPasswordHasherPort;
pub use routing_port::{RouterResponse, RoutingPort};
#[cfg(test)]
pub use routing_port::MockRoutingPort;
