//! Password hashing port

#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Hashes and verifies account passwords
///
/// Implementations are CPU-bound; callers run them on a blocking thread.
#[cfg_attr(test, automock)]
pub trait PasswordHasherPort: Send + Sync {
    /// Hash a plaintext password into a self-describing hash string
    fn hash(&self, password: &str) -> Result<String, ApplicationError>;

    /// Check a plaintext password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> bool;
}
