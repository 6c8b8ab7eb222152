//! Journal location configuration.
//!
//! # Responsibility
//! - Load and persist the `config.json` that names the active journal.
//! - Derive journal file and backup directory paths.
//!
//! # Invariants
//! - A journal named `n` lives at `<journal_dir>/n.db`.
//! - Journal names never contain path separators.

use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_JOURNAL_DIR: &str = "journals";
pub const DEFAULT_JOURNAL_NAME: &str = "notes";
pub const CONFIG_FILE_NAME: &str = "config.json";
const JOURNAL_FILE_EXTENSION: &str = "db";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    /// Config value could not be encoded for writing.
    Serialize { path: PathBuf, source: serde_json::Error },
    InvalidValue(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "config io error at `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config file `{}`: {source}", path.display())
            }
            Self::Serialize { path, source } => {
                write!(f, "cannot encode config for `{}`: {source}", path.display())
            }
            Self::InvalidValue(message) => write!(f, "invalid config value: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } | Self::Serialize { source, .. } => Some(source),
            Self::InvalidValue(_) => None,
        }
    }
}

/// Location of the active journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalConfig {
    pub journal_dir: PathBuf,
    pub journal_name: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            journal_dir: PathBuf::from(DEFAULT_JOURNAL_DIR),
            journal_name: DEFAULT_JOURNAL_NAME.to_string(),
        }
    }
}

impl JournalConfig {
    pub fn new(
        journal_dir: impl Into<PathBuf>,
        journal_name: impl Into<String>,
    ) -> ConfigResult<Self> {
        let config = Self {
            journal_dir: journal_dir.into(),
            journal_name: journal_name.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads config from `path`; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("event=config_load module=config status=ok source=default");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!("event=config_load module=config status=ok source=file");
        Ok(config)
    }

    /// Writes config as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns a copy pointing at another journal in the same directory.
    pub fn with_journal_name(&self, name: impl Into<String>) -> ConfigResult<Self> {
        Self::new(self.journal_dir.clone(), name)
    }

    pub fn db_path(&self) -> PathBuf {
        self.journal_dir
            .join(format!("{}.{JOURNAL_FILE_EXTENSION}", self.journal_name))
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.journal_dir.join("backups").join(&self.journal_name)
    }

    /// Creates `journal_dir` when it does not exist yet.
    pub fn ensure_journal_dir(&self) -> ConfigResult<()> {
        std::fs::create_dir_all(&self.journal_dir).map_err(|source| ConfigError::Io {
            path: self.journal_dir.clone(),
            source,
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        let name = self.journal_name.trim();
        if name.is_empty() {
            return Err(ConfigError::InvalidValue(
                "journal_name cannot be empty".to_string(),
            ));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ConfigError::InvalidValue(format!(
                "journal_name `{name}` must not contain path separators"
            )));
        }
        if self.journal_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue(
                "journal_dir cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, JournalConfig};
    use std::path::PathBuf;

    #[test]
    fn derived_paths_follow_journal_name() {
        let config = JournalConfig::new("/data/journals", "work").unwrap();
        assert_eq!(config.db_path(), PathBuf::from("/data/journals/work.db"));
        assert_eq!(
            config.backup_dir(),
            PathBuf::from("/data/journals/backups/work")
        );
    }

    #[test]
    fn journal_name_rejects_separators_and_blank() {
        let err = JournalConfig::new("/data", "a/b").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
        assert!(JournalConfig::new("/data", "  ").is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = JournalConfig::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, JournalConfig::default());
    }

    #[test]
    fn save_then_load_keeps_switched_journal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = JournalConfig::new(dir.path(), "notes")
            .unwrap()
            .with_journal_name("travel")
            .unwrap();
        config.save(&path).unwrap();

        let loaded = JournalConfig::load(&path).unwrap();
        assert_eq!(loaded.journal_name, "travel");
        assert_eq!(loaded.journal_dir, dir.path());
    }

    #[cfg(unix)]
    #[test]
    fn save_reports_unencodable_dir_as_serialize_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = JournalConfig::new(OsStr::from_bytes(b"/tmp/\xff"), "notes").unwrap();

        let err = config.save(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Serialize { .. }));
        assert!(err.to_string().starts_with("cannot encode config"));
        assert!(!path.exists());
    }

    #[test]
    fn legacy_config_keys_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"journal_dir": "/tmp/j", "journal_name": "notes"}"#).unwrap();
        let loaded = JournalConfig::load(&path).unwrap();
        assert_eq!(loaded.db_path(), PathBuf::from("/tmp/j/notes.db"));
    }
}
