//! Account domain model.
//!
//! # Responsibility
//! - Define the credential record persisted at signup.
//!
//! # Invariants
//! - `account_id` is stable and never reused for another account.
//! - `email` is unique across all accounts and acts as the login key.
//! - `password_hash` holds a self-describing PHC hash string, never the raw
//!   password.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an account.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type AccountId = Uuid;

/// Credential record created once at signup.
///
/// This core never updates or deletes accounts; the record is write-once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Stable global ID referenced by every note's `owner_id`.
    pub account_id: AccountId,
    /// Free-text display name, not used for authentication.
    pub display_name: String,
    /// Login key, unique across accounts.
    pub email: String,
    /// Salted one-way hash in PHC string format.
    pub password_hash: String,
}

impl Account {
    /// Creates an account record with a generated stable ID.
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            account_id: Uuid::new_v4(),
            display_name: display_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Account;

    #[test]
    fn new_accounts_get_distinct_ids() {
        let first = Account::new("Ann", "ann@x.com", "$argon2id$stub");
        let second = Account::new("Ann", "ann2@x.com", "$argon2id$stub");
        assert_ne!(first.account_id, second.account_id);
    }
}
