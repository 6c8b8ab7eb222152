//! CLI argument definitions for the `sjournal` binary.
//!
//! Priority resolution for the config file: `--config` > `SJOURNAL_CONFIG` >
//! `./config.json`.

use clap::{Args, Parser, Subcommand};
use sjournal_core::config::CONFIG_FILE_NAME;
use sjournal_core::{ListOptions, Quantity};
use std::path::PathBuf;

/// Personal note journal backed by a local SQLite file.
#[derive(Parser, Debug)]
#[command(name = "sjournal", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Print notes as JSON instead of a table.
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a note to the journal.
    Add {
        /// Content of the note; prompts when omitted.
        content: Vec<String>,
        /// Category the note is filed under.
        #[arg(short = 'c', long = "category", default_value = sjournal_core::DEFAULT_CATEGORY)]
        category: String,
        /// Display style wrapped around the content, e.g. `bold red`.
        #[arg(short = 's', long = "style")]
        style: Option<String>,
    },
    /// Edit a note; defaults to the most recent one.
    Edit {
        id: Option<i64>,
        /// New content; read from stdin when omitted.
        #[arg(short = 'm', long = "message")]
        message: Option<String>,
    },
    /// List notes, most recent first.
    List {
        /// Number of notes to show.
        quantity: Vec<u32>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List notes whose content matches a term.
    Search {
        /// Search term; only the first word is used.
        terms: Vec<String>,
        /// Number of most recent notes to scan.
        #[arg(short = 'n', long = "quantity")]
        quantity: Option<u32>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Delete notes by id (`3`), up to an id (`-3`) or from an id (`3-`).
    Delete {
        #[arg(allow_hyphen_values = true)]
        criteria: Vec<String>,
    },
    /// Delete every note in the journal.
    Erase,
    /// Back up the journal file. Ten backups are kept.
    Backup {
        /// Backup file name; defaults to a timestamped name.
        #[arg(short = 'f', long = "filename")]
        filename: Option<String>,
    },
    /// Restore the journal from a backup; defaults to the newest one.
    Restore {
        #[arg(short = 'f', long = "filename")]
        filename: Option<String>,
    },
    /// Switch to a journal, creating it if it does not exist.
    Load { journal_name: String },
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Ignore quantity and show every matching note.
    #[arg(short = 'a', long = "all")]
    pub all: bool,
    /// Only show notes in this category.
    #[arg(short = 'c', long = "category")]
    pub category: Option<String>,
    /// Show the selected notes oldest first.
    #[arg(short = 'r', long = "reverse")]
    pub reverse: bool,
}

impl FilterArgs {
    pub fn to_options(&self, quantity: Option<Quantity>) -> ListOptions {
        ListOptions {
            category: self.category.clone(),
            quantity,
            all: self.all,
            reverse: self.reverse,
        }
    }
}

impl CliArgs {
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref path) = self.config {
            return path.clone();
        }
        if let Ok(path) = std::env::var("SJOURNAL_CONFIG") {
            return PathBuf::from(path);
        }
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// `--log-level` > `SJOURNAL_LOG_LEVEL` > build default.
    pub fn resolve_log_level(&self) -> String {
        self.log_level
            .clone()
            .or_else(|| std::env::var("SJOURNAL_LOG_LEVEL").ok())
            .unwrap_or_else(|| sjournal_core::default_log_level().to_string())
    }
}
