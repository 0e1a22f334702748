//! Account storage port

use async_trait::async_trait;
use domain::{Account, EmailAddress, UserId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for persisting accounts
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account
    ///
    /// Returns `ApplicationError::AlreadyExists` if the email is taken.
    async fn insert(&self, account: &Account) -> Result<(), ApplicationError>;

    /// Look up an account by email
    async fn find_by_email(&self, email: &EmailAddress)
    -> Result<Option<Account>, ApplicationError>;

    /// Look up an account by id
    async fn get(&self, id: &UserId) -> Result<Option<Account>, ApplicationError>;
}
