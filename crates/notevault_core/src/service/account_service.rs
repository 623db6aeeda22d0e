//! Account use-case service: signup and login.
//!
//! # Responsibility
//! - Create accounts with hashed credentials and a fresh stable id.
//! - Authenticate by email/password and issue a bearer token.
//!
//! # Invariants
//! - Unknown email and wrong password are indistinguishable to the caller
//!   (`InvalidCredentials` for both; no user-enumeration oracle).
//! - Raw passwords are never persisted or logged.
//! - Unexpected store/hash/sign failures normalize to `Internal` with a
//!   stable message; details go to logs only.

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenService;
use crate::model::account::{Account, AccountId};
use crate::repo::account_repo::AccountRepository;
use crate::repo::RepoError;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for account use-cases.
#[derive(Debug)]
pub enum AccountServiceError {
    /// An account with the requested email already exists.
    DuplicateEmail,
    /// Email/password pair did not authenticate.
    InvalidCredentials,
    /// Unexpected internal failure; details are in the logs.
    Internal(&'static str),
}

impl Display for AccountServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmail => write!(f, "email already registered"),
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::Internal(context) => write!(f, "internal account service error: {context}"),
        }
    }
}

impl Error for AccountServiceError {}

/// Structured signup input, already type-validated by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    /// Free-text display name.
    pub display_name: String,
    /// Unique login key.
    pub email: String,
    /// Raw password; hashed before it touches storage.
    pub password: String,
}

/// Account service facade over the credential store.
pub struct AccountService<R: AccountRepository> {
    repo: R,
    tokens: TokenService,
}

impl<R: AccountRepository> AccountService<R> {
    /// Creates a service using the provided repository and token service.
    pub fn new(repo: R, tokens: TokenService) -> Self {
        Self { repo, tokens }
    }

    /// Registers a new account and returns its stable id.
    ///
    /// # Contract
    /// - Fails with `DuplicateEmail` when the email is already registered,
    ///   whether caught by the lookup or by the store's unique constraint.
    /// - No token is issued at signup; login is a separate step.
    pub fn signup(&self, request: &SignupRequest) -> Result<AccountId, AccountServiceError> {
        let existing = self
            .repo
            .find_account_by_email(&request.email)
            .map_err(|err| internal("signup lookup failed", &err))?;
        if existing.is_some() {
            warn!("event=signup module=account_service status=rejected reason=duplicate_email");
            return Err(AccountServiceError::DuplicateEmail);
        }

        let password_hash = hash_password(&request.password)
            .map_err(|err| internal("password hashing failed", &err))?;

        let account = Account::new(
            request.display_name.as_str(),
            request.email.as_str(),
            password_hash,
        );
        let account_id = match self.repo.create_account(&account) {
            Ok(id) => id,
            // Two signups can race past the lookup; the unique constraint
            // settles it and the loser still sees a duplicate.
            Err(RepoError::Conflict(_)) => {
                warn!(
                    "event=signup module=account_service status=rejected reason=duplicate_email_constraint"
                );
                return Err(AccountServiceError::DuplicateEmail);
            }
            Err(err) => return Err(internal("account insert failed", &err)),
        };

        info!("event=signup module=account_service status=ok account_id={account_id}");
        Ok(account_id)
    }

    /// Authenticates by email/password and returns a signed bearer token.
    ///
    /// # Contract
    /// - Nothing is persisted on login.
    /// - Unknown email and wrong password return the same error kind.
    pub fn login(&self, email: &str, password: &str) -> Result<String, AccountServiceError> {
        let account = match self
            .repo
            .find_account_by_email(email)
            .map_err(|err| internal("login lookup failed", &err))?
        {
            Some(account) => account,
            None => {
                warn!("event=login module=account_service status=rejected reason=unknown_email");
                return Err(AccountServiceError::InvalidCredentials);
            }
        };

        let verified = verify_password(password, &account.password_hash)
            .map_err(|err| internal("stored password hash unusable", &err))?;
        if !verified {
            warn!("event=login module=account_service status=rejected reason=password_mismatch");
            return Err(AccountServiceError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(account.account_id)
            .map_err(|err| internal("token issuance failed", &err))?;

        info!(
            "event=login module=account_service status=ok account_id={}",
            account.account_id
        );
        Ok(token)
    }
}

fn internal(context: &'static str, err: &dyn Error) -> AccountServiceError {
    error!("event=account_service_error module=account_service status=error context=\"{context}\" error={err}");
    AccountServiceError::Internal(context)
}
