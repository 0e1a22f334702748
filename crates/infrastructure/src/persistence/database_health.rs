//! SQLite database health adapter

use std::sync::Arc;

use application::ports::DatabaseHealthPort;
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::ConnectionPool;

/// Readiness check that runs `SELECT 1` on a pooled connection
pub struct SqliteDatabaseHealth {
    pool: Arc<ConnectionPool>,
}

impl std::fmt::Debug for SqliteDatabaseHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDatabaseHealth")
            .field("pool", &"<ConnectionPool>")
            .finish()
    }
}

impl SqliteDatabaseHealth {
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseHealthPort for SqliteDatabaseHealth {
    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        let pool = Arc::clone(&self.pool);
        let result = tokio::task::spawn_blocking(move || {
            pool.get()
                .ok()
                .and_then(|conn| {
                    conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))
                        .ok()
                })
                .is_some()
        })
        .await;

        match result {
            Ok(true) => {
                debug!("Database health check passed");
                true
            },
            Ok(false) => {
                warn!("Database health check failed: unable to execute query");
                false
            },
            Err(e) => {
                warn!(error = %e, "Database health check task failed");
                false
            },
        }
    }
}
