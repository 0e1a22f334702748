//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: Nominatim and
//! OSRM adapters, Argon2 password hashing and SQLite account storage. Also
//! owns configuration loading, logging setup and HTML page templates.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;
pub mod templates;

pub use adapters::*;
pub use config::{
    AppConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig, ResolverConfig, ServerConfig,
};
pub use persistence::{
    ConnectionPool, DatabaseError, SqliteAccountStore, SqliteDatabaseHealth, create_pool,
};
pub use telemetry::{TelemetryError, init_logging};
pub use templates::{AuthForm, PageLink, PageRenderer, TemplateError};
