//! Domain entities - Objects with identity and lifecycle

mod account;
mod route;

pub use account::Account;
pub use route::{RouteCandidate, RouteResult, fastest_index};
