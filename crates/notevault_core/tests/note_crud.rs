use notevault_core::db::open_db_in_memory;
use notevault_core::{
    AccountService, NoteService, NoteServiceError, SignupRequest, SqliteAccountRepository,
    SqliteNoteRepository, TokenConfig, TokenService,
};
use rusqlite::{params, Connection};
use uuid::Uuid;

fn token_service() -> TokenService {
    TokenService::new(TokenConfig::new("note-crud-test-secret-0123456789ab")).unwrap()
}

fn signup_owner(conn: &Connection, email: &str) -> Uuid {
    let repo = SqliteAccountRepository::try_new(conn).unwrap();
    let service = AccountService::new(repo, token_service());
    service
        .signup(&SignupRequest {
            display_name: "Owner".to_string(),
            email: email.to_string(),
            password: "pw123".to_string(),
        })
        .unwrap()
}

#[test]
fn create_then_get_round_trips_title_content_and_owner() {
    let conn = open_db_in_memory().unwrap();
    let owner = signup_owner(&conn, "owner@x.com");
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let created = service
        .create_note(owner, "Shopping", Some("milk, eggs".to_string()))
        .unwrap();
    assert_eq!(created.created_at, created.updated_at);

    let fetched = service.get_note(owner, created.note_id).unwrap();
    assert_eq!(fetched.title, "Shopping");
    assert_eq!(fetched.content.as_deref(), Some("milk, eggs"));
    assert_eq!(fetched.owner_id, owner);
    assert_eq!(fetched, created);
}

#[test]
fn content_is_optional_and_title_accepts_any_string() {
    let conn = open_db_in_memory().unwrap();
    let owner = signup_owner(&conn, "owner@x.com");
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let created = service.create_note(owner, "", None).unwrap();
    let fetched = service.get_note(owner, created.note_id).unwrap();
    assert_eq!(fetched.title, "");
    assert_eq!(fetched.content, None);
}

#[test]
fn update_replaces_wholesale_and_strictly_advances_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let owner = signup_owner(&conn, "owner@x.com");
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let created = service
        .create_note(owner, "Shopping", Some("milk, eggs".to_string()))
        .unwrap();

    let updated = service
        .update_note(owner, created.note_id, "Groceries", None)
        .unwrap();
    assert_eq!(updated.title, "Groceries");
    // Wholesale replacement: old content does not survive the update.
    assert_eq!(updated.content, None);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > updated.created_at);

    let second = service
        .update_note(owner, created.note_id, "Groceries", Some("bread".to_string()))
        .unwrap();
    assert!(second.updated_at > updated.updated_at);
}

#[test]
fn list_returns_owner_notes_most_recently_touched_first() {
    let conn = open_db_in_memory().unwrap();
    let owner = signup_owner(&conn, "owner@x.com");
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let n1 = service.create_note(owner, "N1", None).unwrap();
    let n2 = service.create_note(owner, "N2", None).unwrap();
    let n3 = service.create_note(owner, "N3", None).unwrap();

    // Pin distinct historical timestamps, then touch N1 through the real
    // update path; it must move to the front.
    for (note_id, stamp) in [(&n1.note_id, 1000), (&n2.note_id, 2000), (&n3.note_id, 3000)] {
        conn.execute(
            "UPDATE notes SET created_at = ?2, updated_at = ?2 WHERE note_id = ?1;",
            params![note_id.to_string(), stamp],
        )
        .unwrap();
    }

    service.update_note(owner, n1.note_id, "N1", None).unwrap();

    let listed = service.list_notes(owner).unwrap();
    let ids: Vec<_> = listed.iter().map(|note| note.note_id).collect();
    assert_eq!(ids, vec![n1.note_id, n3.note_id, n2.note_id]);
}

#[test]
fn delete_removes_note_and_further_gets_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let owner = signup_owner(&conn, "owner@x.com");
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let created = service.create_note(owner, "ephemeral", None).unwrap();
    service.delete_note(owner, created.note_id).unwrap();

    let err = service.get_note(owner, created.note_id).unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound(id) if id == created.note_id));

    let err = service.delete_note(owner, created.note_id).unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound(_)));
}

#[test]
fn unknown_note_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let owner = signup_owner(&conn, "owner@x.com");
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let err = service.get_note(owner, Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound(_)));

    let err = service
        .update_note(owner, Uuid::new_v4(), "t", None)
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound(_)));
}

#[test]
fn note_records_serialize_for_transport_collaborators() {
    let conn = open_db_in_memory().unwrap();
    let owner = signup_owner(&conn, "owner@x.com");
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let created = service
        .create_note(owner, "Shopping", Some("milk, eggs".to_string()))
        .unwrap();

    let value = serde_json::to_value(&created).unwrap();
    assert_eq!(value["title"], "Shopping");
    assert_eq!(value["content"], "milk, eggs");
    assert_eq!(value["owner_id"], owner.to_string());
    assert!(value["created_at"].is_i64());
}

#[test]
fn full_signup_login_note_lifecycle_scenario() {
    let conn = open_db_in_memory().unwrap();
    let tokens = token_service();

    let account_repo = SqliteAccountRepository::try_new(&conn).unwrap();
    let accounts = AccountService::new(account_repo, tokens.clone());
    let notes = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    let account_id = accounts
        .signup(&SignupRequest {
            display_name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "pw123".to_string(),
        })
        .unwrap();

    let token = accounts.login("ann@x.com", "pw123").unwrap();
    let authenticated = tokens.verify(&token).unwrap();
    assert_eq!(authenticated, account_id);

    let note = notes
        .create_note(authenticated, "Shopping", Some("milk, eggs".to_string()))
        .unwrap();

    let fetched = notes.get_note(authenticated, note.note_id).unwrap();
    assert_eq!(fetched.title, "Shopping");
    assert_eq!(fetched.content.as_deref(), Some("milk, eggs"));
    assert_eq!(fetched.owner_id, account_id);

    notes.delete_note(authenticated, note.note_id).unwrap();
    let err = notes.get_note(authenticated, note.note_id).unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound(_)));
}
