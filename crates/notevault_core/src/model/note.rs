//! Note domain model.
//!
//! # Responsibility
//! - Define the owner-scoped note record and its lifecycle timestamps.
//!
//! # Invariants
//! - `note_id` is stable and never reused for another note.
//! - `owner_id` is immutable after creation.
//! - `created_at == updated_at` on a freshly created note.
//! - `updated_at` strictly increases across successful updates.

use crate::model::account::AccountId;
use crate::model::current_epoch_ms;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// Personal text note, visible only through owner-scoped operations.
///
/// Notes are hard-deleted; there is no tombstone or archive state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable global ID generated at creation.
    pub note_id: NoteId,
    /// Owning account; the only identity allowed to see or mutate this note.
    pub owner_id: AccountId,
    /// Required title text. Content rules are a transport concern; core
    /// accepts any string, including the empty one.
    pub title: String,
    /// Optional body text.
    pub content: Option<String>,
    /// Creation time in epoch milliseconds, immutable.
    pub created_at: i64,
    /// Last-touch time in epoch milliseconds, refreshed on every update.
    pub updated_at: i64,
}

impl Note {
    /// Creates a note with a generated stable ID and both timestamps set to
    /// the same current instant.
    pub fn new(owner_id: AccountId, title: impl Into<String>, content: Option<String>) -> Self {
        let now_ms = current_epoch_ms();
        Self {
            note_id: Uuid::new_v4(),
            owner_id,
            title: title.into(),
            content,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}
