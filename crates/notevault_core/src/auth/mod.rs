//! Authentication primitives: password hashing, bearer tokens, and the
//! per-request access gateway.
//!
//! # Responsibility
//! - Keep credential verification one-way and salted (argon2id).
//! - Issue and verify signed, time-limited bearer tokens (HS256).
//! - Resolve an inbound bearer credential to an authenticated account id.
//!
//! # Invariants
//! - The signing secret is injected at construction and immutable afterward.
//! - Token validity is purely computed (signature + expiry); there is no
//!   revocation list.

pub mod gateway;
pub mod password;
pub mod token;
