//! Signed bearer token issuance and verification.
//!
//! # Responsibility
//! - Issue self-contained HS256 tokens binding an account id to an absolute
//!   expiry instant.
//! - Verify signature authenticity and expiry, with failure causes kept
//!   distinguishable for diagnostics.
//!
//! # Invariants
//! - The signing secret never appears inside a token.
//! - Verification uses zero leeway: `exp` is exact.
//! - `Malformed`, `SignatureInvalid` and `Expired` are distinct error kinds
//!   here; collapsing them into one outward "unauthenticated" response is
//!   the caller's contract.

use crate::model::account::AccountId;
use crate::model::current_epoch_ms;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Default token lifetime: 60 minutes.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Payload embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id the token is bound to.
    pub sub: String,
    /// Absolute expiry in epoch seconds.
    pub exp: i64,
}

/// Immutable signing configuration injected at service construction.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Server-held symmetric secret; process configuration, never persisted.
    pub secret: String,
    /// Token lifetime in seconds.
    pub ttl_secs: i64,
}

impl TokenConfig {
    /// Creates a config with the default 60-minute lifetime.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

/// Error kinds for token issuance and verification.
#[derive(Debug)]
pub enum TokenError {
    /// Service construction rejected the configuration.
    Config(&'static str),
    /// Token encoding failed at issue time.
    Sign(String),
    /// Token text is not a parseable signed structure.
    Malformed,
    /// Signature does not match the server secret.
    SignatureInvalid,
    /// Signature is authentic but the expiry instant has passed.
    Expired,
}

impl Display for TokenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(details) => write!(f, "invalid token configuration: {details}"),
            Self::Sign(details) => write!(f, "token signing failed: {details}"),
            Self::Malformed => write!(f, "token is malformed"),
            Self::SignatureInvalid => write!(f, "token signature is invalid"),
            Self::Expired => write!(f, "token is expired"),
        }
    }
}

impl Error for TokenError {}

/// Issues and verifies signed, time-limited bearer tokens.
#[derive(Debug, Clone)]
pub struct TokenService {
    config: TokenConfig,
}

impl TokenService {
    /// Creates a token service from immutable configuration.
    ///
    /// # Errors
    /// - Returns `TokenError::Config` when the secret is empty.
    pub fn new(config: TokenConfig) -> Result<Self, TokenError> {
        if config.secret.is_empty() {
            return Err(TokenError::Config("signing secret must not be empty"));
        }
        Ok(Self { config })
    }

    /// Issues a token bound to `account_id`, expiring after the configured
    /// lifetime.
    pub fn issue(&self, account_id: AccountId) -> Result<String, TokenError> {
        let claims = Claims {
            sub: account_id.to_string(),
            exp: now_epoch_secs() + self.config.ttl_secs,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|err| TokenError::Sign(err.to_string()))
    }

    /// Verifies signature and expiry, returning the bound account id.
    pub fn verify(&self, token: &str) -> Result<AccountId, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
            _ => TokenError::Malformed,
        })?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Malformed)
    }
}

fn now_epoch_secs() -> i64 {
    current_epoch_ms() / 1000
}

#[cfg(test)]
mod tests {
    use super::{TokenConfig, TokenError, TokenService};
    use uuid::Uuid;

    fn test_service() -> TokenService {
        TokenService::new(TokenConfig::new("unit-test-secret-0123456789abcdef")).unwrap()
    }

    #[test]
    fn issue_then_verify_returns_bound_account_id() {
        let service = test_service();
        let account_id = Uuid::new_v4();

        let token = service.issue(account_id).unwrap();
        assert_eq!(service.verify(&token).unwrap(), account_id);
    }

    #[test]
    fn empty_secret_is_rejected_at_construction() {
        let err = TokenService::new(TokenConfig::new("")).unwrap_err();
        assert!(matches!(err, TokenError::Config(_)));
    }

    #[test]
    fn garbage_input_is_malformed() {
        let service = test_service();
        assert!(matches!(
            service.verify("not-a-token"),
            Err(TokenError::Malformed)
        ));
    }
}
