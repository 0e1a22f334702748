//! Application layer - Use cases and orchestration
//!
//! Defines the ports the route lookup and account flows depend on, and the
//! services that orchestrate them. Adapters live in `infrastructure`.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
