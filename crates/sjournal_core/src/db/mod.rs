//! Journal file storage: opening and schema upgrades.
//!
//! A journal is one SQLite file holding a single `notes` table. Journals
//! written before schema tracking existed report `user_version = 0` and are
//! upgraded in place without touching their rows.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// The journal file could not be opened or created.
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    Sqlite(rusqlite::Error),
    /// The journal was written by a newer build with a schema this one cannot read.
    NewerJournal { found: u32, readable: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open journal `{}`: {source}", path.display())
            }
            Self::Sqlite(err) => write!(f, "journal storage error: {err}"),
            Self::NewerJournal { found, readable } => write!(
                f,
                "journal uses schema v{found} but this sjournal reads up to v{readable}; upgrade sjournal"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Sqlite(source) => Some(source),
            Self::NewerJournal { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
