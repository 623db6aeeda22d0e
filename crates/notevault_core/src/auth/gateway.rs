//! Per-request access control gateway.
//!
//! # Responsibility
//! - Extract a bearer credential from an inbound authorization header.
//! - Resolve it to an authenticated account id via the token service.
//!
//! # Invariants
//! - Absent, blank and invalid credentials all collapse to one outward
//!   rejection; only logs distinguish the cause.
//! - Signup/login never pass through this gateway; they establish identity
//!   instead of asserting it.

use crate::auth::token::{TokenError, TokenService};
use crate::model::account::AccountId;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

const BEARER_PREFIX: &str = "Bearer ";

/// Rejection raised before a request reaches any operation.
///
/// Both variants map to the same unauthenticated outward response; the
/// split exists for diagnostics only.
#[derive(Debug)]
pub enum AuthError {
    /// No bearer credential was presented.
    MissingCredential,
    /// A credential was presented but failed verification.
    Token(TokenError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "missing bearer credential"),
            Self::Token(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingCredential => None,
            Self::Token(err) => Some(err),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(value: TokenError) -> Self {
        Self::Token(value)
    }
}

/// Authenticates inbound requests by bearer token.
#[derive(Clone)]
pub struct AuthGateway {
    tokens: TokenService,
}

impl AuthGateway {
    /// Creates a gateway verifying against the provided token service.
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }

    /// Resolves an optional authorization header to an account id.
    ///
    /// # Contract
    /// - `None`, non-bearer and blank-token headers are rejected.
    /// - Any token verification failure is rejected; the cause is logged
    ///   but not exposed to the caller beyond the error's own kind.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<AccountId, AuthError> {
        let token = match extract_bearer(authorization) {
            Some(token) => token,
            None => {
                warn!("event=auth module=gateway status=rejected reason=missing_credential");
                return Err(AuthError::MissingCredential);
            }
        };

        match self.tokens.verify(token) {
            Ok(account_id) => Ok(account_id),
            Err(err) => {
                warn!("event=auth module=gateway status=rejected reason={err}");
                Err(err.into())
            }
        }
    }
}

/// Extracts the token from a `Bearer <token>` authorization value.
///
/// Returns `None` for absent headers, other schemes, and blank tokens.
pub fn extract_bearer(authorization: Option<&str>) -> Option<&str> {
    let token = authorization?.strip_prefix(BEARER_PREFIX)?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
