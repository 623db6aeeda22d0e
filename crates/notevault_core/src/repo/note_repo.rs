//! Note store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist note records keyed by note id and owner id.
//! - Keep the authorization boundary visible in the API: owner-scoped
//!   operations carry the owner in their signature and SQL predicate.
//!
//! # Invariants
//! - `fetch_note` is the only unscoped read and exists for trusted/internal
//!   use; services must call the `*_for_owner` operations.
//! - Owner-scoped writes filter by `note_id AND owner_id` in one statement,
//!   so the ownership check is atomic with the write.
//! - `updated_at` is bumped to at least `updated_at + 1` on every update,
//!   keeping it strictly increasing even within one millisecond.

use crate::model::account::AccountId;
use crate::model::note::{Note, NoteId};
use crate::repo::{parse_uuid, table_exists, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    note_id,
    owner_id,
    title,
    content,
    created_at,
    updated_at
FROM notes";

/// Repository interface for the note store.
pub trait NoteRepository {
    /// Persists one note record and returns its stable id.
    fn create_note(&self, note: &Note) -> RepoResult<NoteId>;
    /// Gets one note by id without ownership filtering.
    ///
    /// Trusted/internal use only; operations code must use
    /// [`NoteRepository::fetch_note_for_owner`].
    fn fetch_note(&self, note_id: NoteId) -> RepoResult<Option<Note>>;
    /// Gets one note by id, visible only to its owner.
    fn fetch_note_for_owner(
        &self,
        note_id: NoteId,
        owner_id: AccountId,
    ) -> RepoResult<Option<Note>>;
    /// Lists all notes of one owner, most recently touched first.
    fn list_notes_for_owner(&self, owner_id: AccountId) -> RepoResult<Vec<Note>>;
    /// Replaces title/content of an owned note and refreshes `updated_at`.
    ///
    /// Zero affected rows surface as `RepoError::NotFound`.
    fn update_note_for_owner(
        &self,
        note_id: NoteId,
        owner_id: AccountId,
        title: &str,
        content: Option<&str>,
        now_ms: i64,
    ) -> RepoResult<()>;
    /// Removes an owned note. Zero affected rows surface as
    /// `RepoError::NotFound`.
    fn delete_note_for_owner(&self, note_id: NoteId, owner_id: AccountId) -> RepoResult<()>;
}

/// SQLite-backed note store.
#[derive(Debug)]
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !table_exists(conn, "notes")? {
            return Err(RepoError::MissingRequiredTable("notes"));
        }
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &Note) -> RepoResult<NoteId> {
        self.conn.execute(
            "INSERT INTO notes (note_id, owner_id, title, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                note.note_id.to_string(),
                note.owner_id.to_string(),
                note.title.as_str(),
                note.content.as_deref(),
                note.created_at,
                note.updated_at,
            ],
        )?;

        Ok(note.note_id)
    }

    fn fetch_note(&self, note_id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE note_id = ?1;"))?;

        let mut rows = stmt.query([note_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn fetch_note_for_owner(
        &self,
        note_id: NoteId,
        owner_id: AccountId,
    ) -> RepoResult<Option<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL} WHERE note_id = ?1 AND owner_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![note_id.to_string(), owner_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn list_notes_for_owner(&self, owner_id: AccountId) -> RepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL}
             WHERE owner_id = ?1
             ORDER BY updated_at DESC, note_id ASC;"
        ))?;

        let mut rows = stmt.query([owner_id.to_string()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }

    fn update_note_for_owner(
        &self,
        note_id: NoteId,
        owner_id: AccountId,
        title: &str,
        content: Option<&str>,
        now_ms: i64,
    ) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes
             SET
                title = ?3,
                content = ?4,
                updated_at = MAX(?5, updated_at + 1)
             WHERE note_id = ?1
               AND owner_id = ?2;",
            params![
                note_id.to_string(),
                owner_id.to_string(),
                title,
                content,
                now_ms,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note_id));
        }

        Ok(())
    }

    fn delete_note_for_owner(&self, note_id: NoteId, owner_id: AccountId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM notes WHERE note_id = ?1 AND owner_id = ?2;",
            params![note_id.to_string(), owner_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(note_id));
        }

        Ok(())
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let note_id_text: String = row.get("note_id")?;
    let owner_id_text: String = row.get("owner_id")?;

    Ok(Note {
        note_id: parse_uuid(&note_id_text, "notes.note_id")?,
        owner_id: parse_uuid(&owner_id_text, "notes.owner_id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
