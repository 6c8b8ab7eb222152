//! Core domain logic for sjournal, a personal note journal.
//! This crate is the single source of truth for note storage, deletion
//! criteria, query composition and search.

pub mod backup;
pub mod config;
pub mod criteria;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod search;
pub mod service;

pub use backup::{backup, list_backups, restore, BackupError, BackupResult, MAX_BACKUPS};
pub use config::{ConfigError, ConfigResult, JournalConfig};
pub use criteria::{parse_criteria, parse_token, Criterion};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId, DEFAULT_CATEGORY, TIMESTAMP_FORMAT};
pub use query::{build_query, ListOptions, Quantity, DEFAULT_LIST_LIMIT};
pub use repo::note_repo::{NoteQuery, NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use search::matcher::{SearchError, SearchMatcher, SearchResult};
pub use service::journal_service::{
    DeleteReport, EditRequest, JournalError, JournalService, NewNote, SearchOptions,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
