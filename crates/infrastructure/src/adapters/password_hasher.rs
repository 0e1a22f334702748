//! Account password hashing using Argon2id
//!
//! ```
//! use application::PasswordHasherPort;
//! use infrastructure::adapters::Argon2PasswordHasher;
//!
//! let hasher = Argon2PasswordHasher::new();
//! let hash = hasher.hash("correct horse").unwrap();
//! assert!(hasher.verify("correct horse", &hash));
//! assert!(!hasher.verify("battery staple", &hash));
//! ```

use application::{error::ApplicationError, ports::PasswordHasherPort};
use argon2::{
    Argon2, PasswordHash, PasswordHasher as ArgonPasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use tracing::{debug, instrument, warn};

/// Argon2id hasher producing PHC-format strings
///
/// Uses the crate defaults (19 MiB memory, 2 iterations, 1 lane).
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PasswordHasherPort for Argon2PasswordHasher {
    #[instrument(skip_all)]
    fn hash(&self, password: &str) -> Result<String, ApplicationError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ApplicationError::Internal(format!("Password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    #[instrument(skip_all)]
    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Stored password hash is malformed");
                return false;
            },
        };
        let ok = Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();
        debug!(ok, "Password verification");
        ok
    }
}
