//! Password hashing and verification using argon2id.
//!
//! # Responsibility
//! - Produce self-describing PHC hash strings with a fresh random salt per
//!   call, so no separate salt storage is needed.
//! - Verify candidate passwords against stored hashes in constant time.
//!
//! # Invariants
//! - A password mismatch returns `Ok(false)`, never an error.
//! - A malformed stored hash is a data-corruption error, not a user-facing
//!   condition.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error kind for hashing/verification failures.
#[derive(Debug)]
pub enum PasswordError {
    /// The hashing primitive itself failed.
    Hash(String),
    /// The stored hash blob is not a parseable PHC string.
    MalformedHash(String),
}

impl Display for PasswordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash(details) => write!(f, "password hashing failed: {details}"),
            Self::MalformedHash(details) => write!(f, "stored password hash is malformed: {details}"),
        }
    }
}

impl Error for PasswordError {}

/// Hashes a password with argon2id and a freshly generated salt.
///
/// The same input produces a different PHC string on every call; all
/// parameters needed for verification are embedded in the output.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordError::Hash(err.to_string()))
}

/// Verifies a password against a stored PHC hash string.
///
/// Returns `Ok(false)` on mismatch; errors only when the stored hash itself
/// cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|err| PasswordError::MalformedHash(err.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password};

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("pw123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, "pw123");
        assert!(verify_password("pw123", &hash).unwrap());
        assert!(!verify_password("wrongpass", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently_per_call() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("same-password", &first).unwrap());
        assert!(verify_password("same-password", &second).unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_an_error_not_a_mismatch() {
        let result = verify_password("pw123", "not-a-phc-string");
        assert!(result.is_err());
    }
}
