//! Route Optimizer HTTP presentation layer
//!
//! JSON route lookup API plus the server-rendered account pages.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod shutdown;
pub mod state;

pub use error::{ApiError, ErrorResponse, set_expose_internal_errors};
pub use middleware::{RequestIdLayer, ValidatedJson, ValidationError};
pub use routes::create_router;
pub use session::{Session, SessionStore, SignedIn};
pub use shutdown::{DrainOutcome, run_with_drain_deadline};
pub use state::AppState;
