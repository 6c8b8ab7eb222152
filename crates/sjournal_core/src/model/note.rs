//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical journal entry record.
//! - Format and parse the second-precision timestamp text stored with notes.
//!
//! # Invariants
//! - `id` is allocated as `max(id) + 1` and never reused by `add`.
//! - `timestamp` is stored as `MM-DD-YY HH:MM:SS` text and preserved on edit.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Integer identifier of a note inside one journal.
pub type NoteId = i64;

/// Category assigned when the caller does not provide one.
pub const DEFAULT_CATEGORY: &str = "General";

/// `strftime` pattern of the persisted `timestamp` column.
pub const TIMESTAMP_FORMAT: &str = "%m-%d-%y %H:%M:%S";

/// One journal entry as persisted in the `notes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Creation instant formatted with [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
    pub category: String,
    /// Free text; may carry display markup such as `[bold]..[/]`.
    pub content: String,
}

impl Note {
    /// Creates a note stamped with the current local time.
    pub fn new(id: NoteId, category: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_timestamp(id, current_timestamp(), category, content)
    }

    /// Creates a note with a caller-provided timestamp.
    ///
    /// Used by edit, which must keep the original creation time.
    pub fn with_timestamp(
        id: NoteId,
        timestamp: impl Into<String>,
        category: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            timestamp: timestamp.into(),
            category: category.into(),
            content: content.into(),
        }
    }

    /// Parses `timestamp` back into a date-time.
    ///
    /// Returns `None` for rows written by other tools in another format.
    pub fn date_time(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }
}

impl Display for Note {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] [{}] [{}] - {}",
            self.id, self.timestamp, self.category, self.content
        )
    }
}

/// Formats the current local time as a note timestamp.
pub fn current_timestamp() -> String {
    format_timestamp(&Local::now().naive_local())
}

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}

/// Wraps content in a display style tag, e.g. `[red]text[/]`.
///
/// Blank styles leave the content unchanged.
pub fn apply_style(content: &str, style: Option<&str>) -> String {
    match style.map(str::trim) {
        Some(style) if !style.is_empty() => format!("[{style}]{content}[/]"),
        _ => content.to_string(),
    }
}
