use rusqlite::Connection;
use sjournal_core::db::migrations::{apply_migrations, journal_version, latest_version};
use sjournal_core::db::{open_db, open_db_in_memory, DbError};
use sjournal_core::{NoteRepository, RepoError, SqliteNoteRepository};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "notes");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "notes");
}

#[test]
fn legacy_journal_without_user_version_keeps_its_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE notes(id integer PRIMARY KEY, timestamp text, category text, content text);
         INSERT INTO notes VALUES (4, '01-02-21 10:11:12', 'General', 'old entry');",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    assert_eq!(repo.max_id().unwrap(), Some(4));
    let note = repo.get_note(4).unwrap().unwrap();
    assert_eq!(note.timestamp, "01-02-21 10:11:12");
    assert_eq!(note.content, "old entry");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::NewerJournal { found, readable } => {
            assert_eq!(found, 999);
            assert_eq!(readable, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn newer_journal_error_tells_user_to_upgrade() {
    let err = DbError::NewerJournal {
        found: 7,
        readable: 1,
    };
    let message = err.to_string();
    assert!(message.contains("journal uses schema v7"));
    assert!(message.contains("upgrade sjournal"));
}

#[test]
fn migrations_report_steps_only_on_first_run() {
    let mut conn = Connection::open_in_memory().unwrap();
    assert_eq!(journal_version(&conn).unwrap(), 0);

    let applied = apply_migrations(&mut conn).unwrap();
    assert_eq!(applied, latest_version() as usize);
    assert_eq!(journal_version(&conn).unwrap(), latest_version());
    assert_eq!(apply_migrations(&mut conn).unwrap(), 0);
}

#[test]
fn opening_path_in_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("notes.db");

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::Open { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repository_rejects_unbootstrapped_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteNoteRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("notes")));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
