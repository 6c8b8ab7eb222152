//! Journal use-case service.
//!
//! # Responsibility
//! - Provide add/edit/list/search/delete/erase/fetch over a note store.
//! - Compose query plans, criteria resolution and content matching.
//!
//! # Invariants
//! - New ids are `max(id) + 1`, or `1` for an empty journal.
//! - Edit keeps the original id and timestamp.
//! - Unrecognized deletion tokens are skipped and reported, never raised.

use crate::criteria::{parse_criteria, Criterion};
use crate::model::note::{apply_style, Note, NoteId, DEFAULT_CATEGORY};
use crate::query::{build_query, ListOptions, DEFAULT_LIST_LIMIT};
use crate::repo::note_repo::{NoteQuery, NoteRepository, RepoError};
use crate::search::matcher::{SearchError, SearchMatcher};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for journal use-cases.
#[derive(Debug)]
pub enum JournalError {
    /// Edit without an id on a journal that has no notes.
    EmptyJournal,
    NoteNotFound(NoteId),
    Search(SearchError),
    Repo(RepoError),
}

impl Display for JournalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyJournal => write!(f, "journal is empty; nothing to edit"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Search(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JournalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Search(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for JournalError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<SearchError> for JournalError {
    fn from(value: SearchError) -> Self {
        Self::Search(value)
    }
}

/// Request model for creating a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNote {
    /// Words joined with single spaces to form the content.
    pub content_words: Vec<String>,
    /// Defaults to [`DEFAULT_CATEGORY`].
    pub category: Option<String>,
    /// Optional display style wrapped around the content.
    pub style: Option<String>,
}

impl NewNote {
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            content_words: vec![content.into()],
            ..Self::default()
        }
    }
}

/// Request model for editing a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditRequest {
    /// Target note; `None` edits the most recent note.
    pub id: Option<NoteId>,
    pub content: String,
    /// Replacement category; `None` keeps the old one.
    pub category: Option<String>,
}

/// Search request: list options plus an optional term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub term: Option<String>,
    pub list: ListOptions,
}

/// Outcome of a delete request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// Ids whose rows were actually removed, in deletion order.
    pub removed: Vec<NoteId>,
    /// Raw tokens that matched no criteria pattern.
    pub skipped: Vec<String>,
}

/// Journal service facade over repository implementations.
pub struct JournalService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> JournalService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Creates one note with the next free id and the current time.
    pub fn add(&self, request: NewNote) -> Result<Note, JournalError> {
        let content = apply_style(&request.content_words.join(" "), request.style.as_deref());
        let category = request
            .category
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let note = Note::new(self.repo.next_id()?, category, content);
        self.repo.insert_note(&note)?;
        info!(
            "event=note_add module=service status=ok id={} category={}",
            note.id, note.category
        );
        Ok(note)
    }

    /// Replaces the content of one note, keeping id and timestamp.
    ///
    /// # Errors
    /// - `EmptyJournal` when no id is given and the journal has no notes.
    /// - `NoteNotFound` when the target id does not exist.
    pub fn edit(&self, request: EditRequest) -> Result<Note, JournalError> {
        let existing = self.edit_target(request.id)?;
        let updated = Note::with_timestamp(
            existing.id,
            existing.timestamp,
            request.category.unwrap_or(existing.category),
            request.content,
        );
        self.repo.replace_note(updated.id, &updated)?;
        info!("event=note_edit module=service status=ok id={}", updated.id);
        Ok(updated)
    }

    /// Loads the note an edit would target, without modifying anything.
    pub fn edit_target(&self, id: Option<NoteId>) -> Result<Note, JournalError> {
        let id = match id {
            Some(id) => id,
            None => self.repo.max_id()?.ok_or(JournalError::EmptyJournal)?,
        };
        self.repo
            .get_note(id)?
            .ok_or(JournalError::NoteNotFound(id))
    }

    /// Lists notes most recent first, five by default.
    pub fn list(&self, options: &ListOptions) -> Result<Vec<Note>, JournalError> {
        let query = build_query(options, Some(DEFAULT_LIST_LIMIT));
        Ok(self.repo.list_notes(&query)?)
    }

    /// Lists notes whose content matches the search term.
    ///
    /// Category and limit are applied by the store first; matching and then
    /// reversal run over that window.
    pub fn search(&self, options: &SearchOptions) -> Result<Vec<Note>, JournalError> {
        let matcher = SearchMatcher::new(options.term.as_deref())?;
        let query = NoteQuery {
            reverse: false,
            ..build_query(&options.list, None)
        };
        let mut notes = matcher.filter(self.repo.list_notes(&query)?);
        if options.list.reverse {
            notes.reverse();
        }
        Ok(notes)
    }

    /// Deletes notes selected by criteria tokens.
    pub fn delete<S: AsRef<str>>(&self, tokens: &[S]) -> Result<DeleteReport, JournalError> {
        let mut report = DeleteReport::default();
        for criterion in parse_criteria(tokens) {
            if let Criterion::Unrecognized(token) = &criterion {
                warn!("event=note_delete module=service status=skipped reason=unrecognized_criteria");
                report.skipped.push(token.clone());
                continue;
            }

            let max_id = self.repo.max_id()?;
            let Some(range) = criterion.resolve(max_id) else {
                continue;
            };
            // Ids above the current max cannot exist.
            let end = match (&criterion, max_id) {
                (Criterion::UpTo(_), Some(max)) => (*range.end()).min(max),
                (Criterion::UpTo(_), None) => continue,
                _ => *range.end(),
            };
            for id in *range.start()..=end {
                if self.repo.delete_note(id)? {
                    report.removed.push(id);
                }
            }
        }

        info!(
            "event=note_delete module=service status=ok removed={} skipped={}",
            report.removed.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Deletes every note and returns the number of removed rows.
    pub fn erase(&self) -> Result<usize, JournalError> {
        let removed = self.repo.delete_all()?;
        info!("event=note_erase module=service status=ok removed={removed}");
        Ok(removed)
    }

    /// Returns every note, most recent first.
    pub fn fetch(&self) -> Result<Vec<Note>, JournalError> {
        Ok(self.repo.list_notes(&NoteQuery::default())?)
    }
}
