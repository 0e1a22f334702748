//! Persistence module
//!
//! SQLite-backed account storage behind an r2d2 pool.

pub mod account_store;
pub mod connection;
pub mod database_health;
pub mod migrations;

pub use account_store::SqliteAccountStore;
pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use database_health::SqliteDatabaseHealth;
