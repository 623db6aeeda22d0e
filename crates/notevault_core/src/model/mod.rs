//! Domain records for the multi-tenant notes core.
//!
//! # Responsibility
//! - Define the canonical account and note shapes used by core business logic.
//! - Provide the epoch-millisecond clock used for note timestamps.
//!
//! # Invariants
//! - Every record is identified by a stable UUID that is never reused.
//! - A note's `owner_id` is set once at creation and never changes.

use std::time::{SystemTime, UNIX_EPOCH};

pub mod account;
pub mod note;

/// Returns the current wall-clock time in epoch milliseconds.
///
/// Clamps to zero for clocks set before the unix epoch instead of failing;
/// timestamps here carry ordering information, nothing security-relevant.
pub fn current_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
