//! Credential store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist account records created at signup.
//! - Resolve accounts by their login key (email).
//!
//! # Invariants
//! - `accounts.email` uniqueness is enforced by the schema; a violated
//!   constraint surfaces as `RepoError::Conflict`, never a raw SQL error.
//! - Accounts are write-once: there is no update or delete path.

use crate::model::account::{Account, AccountId};
use crate::repo::{parse_uuid, table_exists, RepoError, RepoResult};
use rusqlite::{params, Connection, ErrorCode, Row};

const ACCOUNT_SELECT_SQL: &str = "SELECT
    account_id,
    display_name,
    email,
    password_hash
FROM accounts";

/// Repository interface for the credential store.
pub trait AccountRepository {
    /// Persists one account record and returns its stable id.
    fn create_account(&self, account: &Account) -> RepoResult<AccountId>;
    /// Looks up one account by its unique email, if present.
    fn find_account_by_email(&self, email: &str) -> RepoResult<Option<Account>>;
}

/// SQLite-backed credential store.
#[derive(Debug)]
pub struct SqliteAccountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !table_exists(conn, "accounts")? {
            return Err(RepoError::MissingRequiredTable("accounts"));
        }
        Ok(Self { conn })
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn create_account(&self, account: &Account) -> RepoResult<AccountId> {
        let inserted = self.conn.execute(
            "INSERT INTO accounts (account_id, display_name, email, password_hash)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                account.account_id.to_string(),
                account.display_name.as_str(),
                account.email.as_str(),
                account.password_hash.as_str(),
            ],
        );

        match inserted {
            Ok(_) => Ok(account.account_id),
            Err(err) if is_unique_violation(&err) => Err(RepoError::Conflict("accounts.email")),
            Err(err) => Err(err.into()),
        }
    }

    fn find_account_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} WHERE email = ?1;"))?;

        let mut rows = stmt.query([email])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_account_row(row)?));
        }

        Ok(None)
    }
}

fn parse_account_row(row: &Row<'_>) -> RepoResult<Account> {
    let id_text: String = row.get("account_id")?;
    Ok(Account {
        account_id: parse_uuid(&id_text, "accounts.account_id")?,
        display_name: row.get("display_name")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::{AccountRepository, SqliteAccountRepository};
    use crate::db::open_db_in_memory;
    use crate::model::account::Account;
    use crate::repo::RepoError;
    use rusqlite::Connection;

    #[test]
    fn try_new_requires_a_migrated_schema() {
        let bare = Connection::open_in_memory().unwrap();
        let err = SqliteAccountRepository::try_new(&bare).unwrap_err();
        assert!(matches!(err, RepoError::MissingRequiredTable("accounts")));
    }

    #[test]
    fn create_then_find_by_email_round_trips_the_record() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteAccountRepository::try_new(&conn).unwrap();

        let account = Account::new("Ann", "ann@x.com", "$argon2id$stub");
        repo.create_account(&account).unwrap();

        let found = repo.find_account_by_email("ann@x.com").unwrap().unwrap();
        assert_eq!(found, account);
        assert!(repo.find_account_by_email("missing@x.com").unwrap().is_none());
    }
}
