//! Registered account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{EmailAddress, UserId};

/// A user who can sign in to the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    id: UserId,
    email: EmailAddress,
    /// Optional name entered at signup
    name: Option<String>,
    /// PHC-format password hash, never serialized
    #[serde(skip)]
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a freshly generated id
    #[must_use]
    pub fn new(email: EmailAddress, name: Option<String>, password_hash: String) -> Self {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        Self {
            id: UserId::new(),
            email,
            name,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Restore an account from storage
    #[must_use]
    pub const fn restore(
        id: UserId,
        email: EmailAddress,
        name: Option<String>,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            password_hash,
            created_at,
        }
    }

    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Name shown in the UI, falling back to the email address
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.email.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> EmailAddress {
        EmailAddress::new("dispatch@fleet.example").unwrap()
    }

    #[test]
    fn display_name_prefers_name() {
        let account = Account::new(email(), Some("Wanjiku".to_string()), "hash".to_string());
        assert_eq!(account.display_name(), "Wanjiku");
    }

    #[test]
    fn blank_name_falls_back_to_email() {
        let account = Account::new(email(), Some("   ".to_string()), "hash".to_string());
        assert_eq!(account.name(), None);
        assert_eq!(account.display_name(), "dispatch@fleet.example");
    }

    #[test]
    fn hash_is_not_serialized() {
        let account = Account::new(email(), None, "secret-hash".to_string());
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
