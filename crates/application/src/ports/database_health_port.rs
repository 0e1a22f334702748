//! Database health check port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Port for database connectivity checks used by the readiness check
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHealthPort: Send + Sync {
    /// Run a trivial query and report whether it succeeded
    async fn is_available(&self) -> bool;
}
