//! Core domain logic for NoteVault, a multi-tenant notes service.
//! This crate is the single source of truth for business invariants:
//! credential issuance/verification and owner-scoped note access.
//!
//! Transport routing and process startup live in collaborator crates; they
//! hand this core already-validated structured input and serialize whatever
//! records it returns.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use auth::gateway::{extract_bearer, AuthError, AuthGateway};
pub use auth::password::{hash_password, verify_password, PasswordError};
pub use auth::token::{Claims, TokenConfig, TokenError, TokenService, DEFAULT_TOKEN_TTL_SECS};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{Account, AccountId};
pub use model::note::{Note, NoteId};
pub use repo::account_repo::{AccountRepository, SqliteAccountRepository};
pub use repo::note_repo::{NoteRepository, SqliteNoteRepository};
pub use repo::{RepoError, RepoResult};
pub use service::account_service::{AccountService, AccountServiceError, SignupRequest};
pub use service::note_service::{NoteService, NoteServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
