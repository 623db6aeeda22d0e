//! Note use-case service, scoped to an authenticated owner.
//!
//! # Responsibility
//! - Provide owner-scoped create/list/get/update/delete APIs.
//! - Keep "absent" and "owned by someone else" indistinguishable.
//!
//! # Invariants
//! - Every operation takes the authenticated `AccountId` resolved by the
//!   access gateway; there is no unscoped entry point.
//! - Update replaces title/content wholesale and strictly increases
//!   `updated_at`.
//! - A write that affects zero rows after a passing ownership pre-check is
//!   a lost race, surfaced as `UpdateFailed` and never as `NotFound`.

use crate::model::account::AccountId;
use crate::model::current_epoch_ms;
use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::NoteRepository;
use crate::repo::RepoError;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Note is absent or not owned by the requesting account; the two cases
    /// are deliberately indistinguishable.
    NotFound(NoteId),
    /// A concurrent writer removed the note between pre-check and write.
    UpdateFailed(&'static str),
    /// Unexpected internal failure; details are in the logs.
    Internal(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(note_id) => write!(f, "note not found: {note_id}"),
            Self::UpdateFailed(context) => write!(f, "note write failed: {context}"),
            Self::Internal(context) => write!(f, "internal note service error: {context}"),
        }
    }
}

impl Error for NoteServiceError {}

/// Note service facade over the note store.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note owned by `owner_id` and returns the persisted record.
    ///
    /// # Contract
    /// - `created_at == updated_at` on the returned note.
    /// - Title may be any string; content is optional.
    pub fn create_note(
        &self,
        owner_id: AccountId,
        title: impl Into<String>,
        content: Option<String>,
    ) -> Result<Note, NoteServiceError> {
        let note = Note::new(owner_id, title, content);
        let note_id = self
            .repo
            .create_note(&note)
            .map_err(|err| internal("note insert failed", &err))?;

        info!("event=note_create module=note_service status=ok note_id={note_id}");

        self.repo
            .fetch_note_for_owner(note_id, owner_id)
            .map_err(|err| internal("created note read-back failed", &err))?
            .ok_or_else(|| internal_plain("created note missing on read-back"))
    }

    /// Lists all notes of `owner_id` as a stable snapshot, most recently
    /// touched first.
    pub fn list_notes(&self, owner_id: AccountId) -> Result<Vec<Note>, NoteServiceError> {
        self.repo
            .list_notes_for_owner(owner_id)
            .map_err(|err| internal("note list failed", &err))
    }

    /// Gets one note visible to `owner_id`.
    ///
    /// # Contract
    /// - `NotFound` whether the note is truly absent or owned by another
    ///   account.
    pub fn get_note(
        &self,
        owner_id: AccountId,
        note_id: NoteId,
    ) -> Result<Note, NoteServiceError> {
        self.repo
            .fetch_note_for_owner(note_id, owner_id)
            .map_err(|err| internal("note fetch failed", &err))?
            .ok_or(NoteServiceError::NotFound(note_id))
    }

    /// Replaces title/content of an owned note and returns the refreshed
    /// record.
    ///
    /// # Contract
    /// - Ownership pre-check failing is `NotFound`.
    /// - Zero rows affected after a passing pre-check is `UpdateFailed`.
    /// - `updated_at` on the returned note is strictly greater than before.
    pub fn update_note(
        &self,
        owner_id: AccountId,
        note_id: NoteId,
        title: impl Into<String>,
        content: Option<String>,
    ) -> Result<Note, NoteServiceError> {
        self.get_note(owner_id, note_id)?;

        let title = title.into();
        self.repo
            .update_note_for_owner(
                note_id,
                owner_id,
                title.as_str(),
                content.as_deref(),
                current_epoch_ms(),
            )
            .map_err(|err| match err {
                RepoError::NotFound(_) => {
                    error!(
                        "event=note_update module=note_service status=error reason=lost_race note_id={note_id}"
                    );
                    NoteServiceError::UpdateFailed("note vanished during update")
                }
                other => internal("note update failed", &other),
            })?;

        info!("event=note_update module=note_service status=ok note_id={note_id}");

        self.repo
            .fetch_note_for_owner(note_id, owner_id)
            .map_err(|err| internal("updated note read-back failed", &err))?
            .ok_or_else(|| internal_plain("updated note missing on read-back"))
    }

    /// Removes an owned note.
    ///
    /// # Contract
    /// - Ownership pre-check failing is `NotFound`.
    /// - Zero rows affected after a passing pre-check is `UpdateFailed`
    ///   (a race, not an authorization outcome).
    pub fn delete_note(
        &self,
        owner_id: AccountId,
        note_id: NoteId,
    ) -> Result<(), NoteServiceError> {
        self.get_note(owner_id, note_id)?;

        self.repo
            .delete_note_for_owner(note_id, owner_id)
            .map_err(|err| match err {
                RepoError::NotFound(_) => {
                    error!(
                        "event=note_delete module=note_service status=error reason=lost_race note_id={note_id}"
                    );
                    NoteServiceError::UpdateFailed("note vanished during delete")
                }
                other => internal("note delete failed", &other),
            })?;

        info!("event=note_delete module=note_service status=ok note_id={note_id}");
        Ok(())
    }
}

fn internal(context: &'static str, err: &dyn Error) -> NoteServiceError {
    error!("event=note_service_error module=note_service status=error context=\"{context}\" error={err}");
    NoteServiceError::Internal(context)
}

fn internal_plain(context: &'static str) -> NoteServiceError {
    error!("event=note_service_error module=note_service status=error context=\"{context}\"");
    NoteServiceError::Internal(context)
}
