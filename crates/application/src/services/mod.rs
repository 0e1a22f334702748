//! Application services - Use case implementations

mod account_service;
mod route_service;

pub use account_service::AccountService;
pub use route_service::{DEFAULT_CALL_TIMEOUT, RouteService};
