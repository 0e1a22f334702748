//! Domain layer for the route optimizer
//!
//! Contains places, locations, route candidates and the fastest-route
//! selection, plus the account entity. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
