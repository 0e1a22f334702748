//! SQLite account store implementation
//!
//! Implements the `AccountStore` port using SQLite.

use std::sync::Arc;

use application::{error::ApplicationError, ports::AccountStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Account, EmailAddress, UserId};
use rusqlite::{ErrorCode, OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

const SELECT_COLUMNS: &str = "SELECT id, email, password_hash, name, created_at FROM accounts";

/// SQLite-based account store
#[derive(Debug, Clone)]
pub struct SqliteAccountStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteAccountStore {
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    async fn query_one(
        &self,
        filter: &'static str,
        value: String,
    ) -> Result<Option<Account>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            conn.query_row(
                &format!("{SELECT_COLUMNS} WHERE {filter} = ?1"),
                [value],
                row_to_account,
            )
            .optional()
            .map_err(|e| ApplicationError::Internal(e.to_string()))
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

fn conversion_error(
    idx: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
}

/// Convert a database row to an `Account`
fn row_to_account(row: &Row<'_>) -> Result<Account, rusqlite::Error> {
    let id: String = row.get(0)?;
    let email: String = row.get(1)?;
    let password_hash: String = row.get(2)?;
    let name: Option<String> = row.get(3)?;
    let created_at: String = row.get(4)?;

    let id = id.parse::<UserId>().map_err(|e| conversion_error(0, e))?;
    let email = EmailAddress::new(email).map_err(|e| conversion_error(1, e))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| conversion_error(4, e))?
        .with_timezone(&Utc);

    Ok(Account::restore(id, email, name, password_hash, created_at))
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
    )
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    #[instrument(skip(self, account), fields(user_id = %account.id()))]
    async fn insert(&self, account: &Account) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let account = account.clone();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            conn.execute(
                "INSERT INTO accounts (id, email, password_hash, name, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    account.id().to_string(),
                    account.email().as_str(),
                    account.password_hash(),
                    account.name(),
                    account.created_at().to_rfc3339(),
                ],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApplicationError::AlreadyExists(format!(
                        "Account {} already exists",
                        account.email()
                    ))
                } else {
                    ApplicationError::Internal(e.to_string())
                }
            })?;

            debug!("Inserted account");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self), fields(email = %email))]
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, ApplicationError> {
        self.query_one("email", email.as_str().to_string()).await
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn get(&self, id: &UserId) -> Result<Option<Account>, ApplicationError> {
        self.query_one("id", id.to_string()).await
    }
}
