//! Account service
//!
//! Signup and login for the dashboard. Password hashing runs on the blocking
//! thread pool.

use std::{fmt, sync::Arc};

use domain::{Account, EmailAddress, UserId};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{AccountStore, PasswordHasherPort},
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Account service for signup and login
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    hasher: Arc<dyn PasswordHasherPort>,
}

impl fmt::Debug for AccountService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}

impl AccountService {
    /// Create a new account service
    pub fn new(store: Arc<dyn AccountStore>, hasher: Arc<dyn PasswordHasherPort>) -> Self {
        Self { store, hasher }
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// - `Domain` if the email is malformed
    /// - `InvalidInput` if the password is empty
    /// - `AlreadyExists` if the email is already registered
    #[instrument(skip(self, password))]
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<Account, ApplicationError> {
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "password must not be empty".into(),
            ));
        }
        if self.store.find_by_email(&email).await?.is_some() {
            return Err(ApplicationError::AlreadyExists(format!(
                "account {email}"
            )));
        }

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ApplicationError::Internal(e.to_string()))??;

        let account = Account::new(email, name.map(str::to_owned), hash);
        self.store.insert(&account).await?;
        info!(account_id = %account.id(), "Account created");
        Ok(account)
    }

    /// Authenticate with email and password
    ///
    /// Unknown emails and wrong passwords produce the same error.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, ApplicationError> {
        let invalid = || ApplicationError::NotAuthorized(INVALID_CREDENTIALS.into());

        let email = EmailAddress::new(email).map_err(|_| invalid())?;
        let Some(account) = self.store.find_by_email(&email).await? else {
            debug!("Login for unknown email");
            return Err(invalid());
        };

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let hash = account.password_hash().to_owned();
        let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;

        if !verified {
            debug!(account_id = %account.id(), "Password mismatch");
            return Err(invalid());
        }
        Ok(account)
    }

    /// Load an account by id
    #[instrument(skip(self))]
    pub async fn find(&self, id: &UserId) -> Result<Option<Account>, ApplicationError> {
        self.store.get(id).await
    }
}
