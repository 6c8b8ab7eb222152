//! File-level journal backup and restore.
//!
//! # Responsibility
//! - Copy the journal file into `<journal_dir>/backups/<journal_name>/`.
//! - Restore a named or the newest backup over the journal file.
//!
//! # Invariants
//! - Backup files always carry the `.db` extension.
//! - At most [`MAX_BACKUPS`] backups are kept per journal; the oldest by
//!   modification time are removed first.

use crate::config::JournalConfig;
use chrono::Local;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub const MAX_BACKUPS: usize = 10;
const BACKUP_TIMESTAMP_FORMAT: &str = "%y_%m_%d_%H_%M_%S";
const BACKUP_EXTENSION: &str = "db";

pub type BackupResult<T> = Result<T, BackupError>;

#[derive(Debug)]
pub enum BackupError {
    Io { path: PathBuf, source: std::io::Error },
    /// Requested backup (or any backup, for "newest") does not exist.
    NotFound(PathBuf),
    InvalidFileName(String),
}

impl Display for BackupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "backup io error at `{}`: {source}", path.display())
            }
            Self::NotFound(path) => write!(f, "backup not found: {}", path.display()),
            Self::InvalidFileName(name) => write!(f, "invalid backup file name `{name}`"),
        }
    }
}

impl Error for BackupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Copies the journal file into the backup directory.
///
/// Returns the path of the written backup.
pub fn backup(config: &JournalConfig, file_name: Option<&str>) -> BackupResult<PathBuf> {
    let source = config.db_path();
    if !source.exists() {
        return Err(BackupError::NotFound(source));
    }

    let backup_dir = config.backup_dir();
    std::fs::create_dir_all(&backup_dir).map_err(|err| io_error(&backup_dir, err))?;

    let name = match file_name {
        Some(name) => normalize_file_name(name)?,
        None => format!(
            "backup_{}_{}.{BACKUP_EXTENSION}",
            config.journal_name,
            Local::now().format(BACKUP_TIMESTAMP_FORMAT)
        ),
    };
    let target = backup_dir.join(name);
    std::fs::copy(&source, &target).map_err(|err| io_error(&target, err))?;
    info!(
        "event=journal_backup module=backup status=ok journal={}",
        config.journal_name
    );

    prune_backups(&backup_dir, MAX_BACKUPS)?;
    Ok(target)
}

/// Copies a backup over the journal file.
///
/// With no `file_name`, the most recently modified backup is used.
pub fn restore(config: &JournalConfig, file_name: Option<&str>) -> BackupResult<PathBuf> {
    let backup_dir = config.backup_dir();
    let source = match file_name {
        Some(name) => backup_dir.join(normalize_file_name(name)?),
        None => list_backups(config)?
            .into_iter()
            .next()
            .ok_or_else(|| BackupError::NotFound(backup_dir.clone()))?,
    };
    if !source.is_file() {
        return Err(BackupError::NotFound(source));
    }

    let target = config.db_path();
    std::fs::copy(&source, &target).map_err(|err| io_error(&target, err))?;
    info!(
        "event=journal_restore module=backup status=ok journal={}",
        config.journal_name
    );
    Ok(source)
}

/// Lists backup files of the journal, newest first.
pub fn list_backups(config: &JournalConfig) -> BackupResult<Vec<PathBuf>> {
    Ok(backups_by_age(&config.backup_dir())?
        .into_iter()
        .map(|(path, _)| path)
        .collect())
}

fn backups_by_age(dir: &Path) -> BackupResult<Vec<(PathBuf, SystemTime)>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|err| io_error(dir, err))? {
        let entry = entry.map_err(|err| io_error(dir, err))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .map_err(|err| io_error(&path, err))?;
        entries.push((path, modified));
    }

    // Newest first; names break ties so same-second backups order stably.
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
    Ok(entries)
}

fn prune_backups(dir: &Path, keep: usize) -> BackupResult<()> {
    for (path, _) in backups_by_age(dir)?.into_iter().skip(keep) {
        match std::fs::remove_file(&path) {
            Ok(()) => info!("event=backup_prune module=backup status=ok"),
            Err(err) => warn!("event=backup_prune module=backup status=error error={err}"),
        }
    }
    Ok(())
}

fn normalize_file_name(name: &str) -> BackupResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
        return Err(BackupError::InvalidFileName(name.to_string()));
    }
    let stem = trimmed.strip_suffix(".db").unwrap_or(trimmed);
    if stem.is_empty() {
        return Err(BackupError::InvalidFileName(name.to_string()));
    }
    Ok(format!("{stem}.{BACKUP_EXTENSION}"))
}

fn io_error(path: &Path, source: std::io::Error) -> BackupError {
    BackupError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_file_name, BackupError};

    #[test]
    fn file_name_gets_single_db_extension() {
        assert_eq!(normalize_file_name("weekly").unwrap(), "weekly.db");
        assert_eq!(normalize_file_name("weekly.db").unwrap(), "weekly.db");
    }

    #[test]
    fn file_name_rejects_paths() {
        let err = normalize_file_name("../escape").unwrap_err();
        assert!(matches!(err, BackupError::InvalidFileName(_)));
        assert!(normalize_file_name(".db").is_err());
    }
}
