//! Value Objects - Immutable, identity-less domain primitives

mod email_address;
mod geo_location;
mod location;
mod place;
mod user_id;

pub use email_address::EmailAddress;
pub use geo_location::GeoLocation;
pub use location::Location;
pub use place::Place;
pub use user_id::UserId;
