//! Note store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/replace/delete/read APIs over the flat `notes` table.
//! - Execute query plans (category filter, id-descending order, limit,
//!   in-memory reversal) with bound parameters only.
//!
//! # Invariants
//! - `id` is unique; inserting an existing id fails with `DuplicateId`.
//! - Storage ordering is always `id DESC`; reversal happens after limit.
//! - Deleting an absent id is a no-op, not an error.

use crate::db::DbError;
use crate::model::note::{Note, NoteId};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    timestamp,
    category,
    content
FROM notes";

const REQUIRED_COLUMNS: [&str; 4] = ["id", "timestamp", "category", "content"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A row with this id already exists.
    DuplicateId(NoteId),
    NotFound(NoteId),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "note id already exists: {id}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Executable read plan for the note store.
///
/// Built by [`crate::query::build_query`] from caller options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    /// Case-sensitive exact category match.
    pub category: Option<String>,
    /// Row cap applied to the id-descending order. `None` returns all rows.
    pub limit: Option<u32>,
    /// Reverses the already-limited window in memory.
    pub reverse: bool,
}

/// Repository interface for the journal's note table.
pub trait NoteRepository {
    /// Inserts a note with an explicit id.
    fn insert_note(&self, note: &Note) -> RepoResult<()>;
    /// Removes any row with `id` and inserts `note` in one transaction.
    fn replace_note(&self, id: NoteId, note: &Note) -> RepoResult<()>;
    /// Deletes one row; returns whether a row was removed.
    fn delete_note(&self, id: NoteId) -> RepoResult<bool>;
    /// Empties the table and returns the number of removed rows.
    fn delete_all(&self) -> RepoResult<usize>;
    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Runs a query plan; rows come back most recent first unless reversed.
    fn list_notes(&self, query: &NoteQuery) -> RepoResult<Vec<Note>>;
    /// Highest stored id, or `None` for an empty table.
    fn max_id(&self) -> RepoResult<Option<NoteId>>;

    /// Id the next created note should receive.
    fn next_id(&self) -> RepoResult<NoteId> {
        match self.max_id()? {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or_else(|| {
                RepoError::InvalidData(format!("note id space exhausted after id {max}"))
            }),
        }
    }
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - Returns `MissingRequiredTable`/`MissingRequiredColumn` when the
    ///   connection was not bootstrapped through [`crate::db::open_db`].
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_note_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert_note(&self, note: &Note) -> RepoResult<()> {
        insert_row(self.conn, note)
    }

    fn replace_note(&self, id: NoteId, note: &Note) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        insert_row(&tx, note)?;
        tx.commit()?;
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> RepoResult<bool> {
        let changed = self.conn.execute("DELETE FROM notes WHERE id = ?1;", [id])?;
        debug!("event=note_delete module=repo status=ok id={id} removed={changed}");
        Ok(changed > 0)
    }

    fn delete_all(&self) -> RepoResult<usize> {
        let changed = self.conn.execute("DELETE FROM notes;", [])?;
        Ok(changed)
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn list_notes(&self, query: &NoteQuery) -> RepoResult<Vec<Note>> {
        let mut sql = String::from(NOTE_SELECT_SQL);
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = query.category.as_ref() {
            sql.push_str(" WHERE category = ?");
            bind_values.push(Value::Text(category.clone()));
        }

        sql.push_str(" ORDER BY id DESC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        if query.reverse {
            notes.reverse();
        }

        Ok(notes)
    }

    fn max_id(&self) -> RepoResult<Option<NoteId>> {
        let max = self
            .conn
            .query_row("SELECT MAX(id) FROM notes;", [], |row| {
                row.get::<_, Option<NoteId>>(0)
            })?;
        Ok(max)
    }
}

fn insert_row(conn: &Connection, note: &Note) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO notes (id, timestamp, category, content) VALUES (?1, ?2, ?3, ?4);",
        params![
            note.id,
            note.timestamp.as_str(),
            note.category.as_str(),
            note.content.as_str(),
        ],
    )
    .map_err(|err| map_insert_error(err, note.id))?;
    Ok(())
}

fn map_insert_error(err: rusqlite::Error, id: NoteId) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            RepoError::DuplicateId(id)
        }
        _ => err.into(),
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id: NoteId = row.get("id")?;
    let timestamp: Option<String> = row.get("timestamp")?;
    let timestamp = timestamp
        .ok_or_else(|| RepoError::InvalidData(format!("note {id} has no timestamp")))?;

    Ok(Note {
        id,
        timestamp,
        category: row.get::<_, Option<String>>("category")?.unwrap_or_default(),
        content: row.get::<_, Option<String>>("content")?.unwrap_or_default(),
    })
}

fn ensure_note_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "notes")? {
        return Err(RepoError::MissingRequiredTable("notes"));
    }

    for column in REQUIRED_COLUMNS {
        if !table_has_column(conn, "notes", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "notes",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
