//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository, hashing and token calls into use-case APIs.
//! - Normalize unexpected lower-layer failures into information-minimal
//!   internal errors before they reach callers.
//!
//! # See also
//! - `auth::gateway` for the per-request authentication that must run
//!   before any note operation.

pub mod account_service;
pub mod note_service;
