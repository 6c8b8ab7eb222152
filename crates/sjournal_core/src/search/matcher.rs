//! Regex-based content matcher.
//!
//! # Invariants
//! - A term `t` is matched as `.*t.*`, case-insensitively, against content.
//! - Absent or empty terms match every note; whitespace is kept as typed.
//! - The term is a regex fragment; invalid fragments are rejected up front.

use crate::model::note::Note;
use regex::{Regex, RegexBuilder};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SearchResult<T> = Result<T, SearchError>;

#[derive(Debug)]
pub enum SearchError {
    /// Search term does not form a valid pattern.
    InvalidPattern { term: String, message: String },
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { term, message } => {
                write!(f, "invalid search term `{term}`: {message}")
            }
        }
    }
}

impl Error for SearchError {}

/// Compiled case-insensitive content filter.
#[derive(Debug, Clone)]
pub struct SearchMatcher {
    pattern: Regex,
}

impl SearchMatcher {
    /// Compiles a matcher for `term`; `None` or `""` matches everything.
    pub fn new(term: Option<&str>) -> SearchResult<Self> {
        let source = wildcard_pattern(term);
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|err| SearchError::InvalidPattern {
                term: term.unwrap_or_default().to_string(),
                message: err.to_string(),
            })?;
        Ok(Self { pattern })
    }

    pub fn is_match(&self, note: &Note) -> bool {
        self.pattern.is_match(&note.content)
    }

    /// Keeps matching notes, preserving input order.
    pub fn filter(&self, notes: Vec<Note>) -> Vec<Note> {
        notes.into_iter().filter(|note| self.is_match(note)).collect()
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Wraps a search term as `.*<term>.*`.
pub fn wildcard_pattern(term: Option<&str>) -> String {
    match term {
        Some(term) if !term.is_empty() => format!(".*{term}.*"),
        _ => ".*".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{wildcard_pattern, SearchError, SearchMatcher};
    use crate::model::note::Note;

    fn note(content: &str) -> Note {
        Note::with_timestamp(1, "01-01-24 00:00:00", "General", content)
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let matcher = SearchMatcher::new(Some("foo")).unwrap();
        assert!(matcher.is_match(&note("Foobar")));
        assert!(matcher.is_match(&note("a FOO b")));
        assert!(!matcher.is_match(&note("bar")));
    }

    #[test]
    fn absent_or_empty_term_matches_everything() {
        assert_eq!(wildcard_pattern(None), ".*");
        assert_eq!(wildcard_pattern(Some("")), ".*");
        let matcher = SearchMatcher::new(None).unwrap();
        assert!(matcher.is_match(&note("")));
    }

    #[test]
    fn surrounding_whitespace_in_term_is_significant() {
        assert_eq!(wildcard_pattern(Some(" cat")), ".* cat.*");

        let leading = SearchMatcher::new(Some(" cat")).unwrap();
        assert!(leading.is_match(&note("a cat")));
        assert!(!leading.is_match(&note("catalog")));

        let space = SearchMatcher::new(Some(" ")).unwrap();
        assert!(space.is_match(&note("a cat")));
        assert!(!space.is_match(&note("catalog")));
        assert!(!space.is_match(&note("nospace")));
    }

    #[test]
    fn term_is_treated_as_pattern_fragment() {
        let matcher = SearchMatcher::new(Some("b.d")).unwrap();
        assert!(matcher.is_match(&note("a bad day")));
        assert_eq!(matcher.as_str(), ".*b.d.*");
    }

    #[test]
    fn invalid_fragment_is_rejected() {
        let err = SearchMatcher::new(Some("(")).unwrap_err();
        assert!(matches!(err, SearchError::InvalidPattern { .. }));
    }

    #[test]
    fn filter_preserves_order() {
        let matcher = SearchMatcher::new(Some("x")).unwrap();
        let notes = vec![
            Note::with_timestamp(3, "t", "c", "x3"),
            Note::with_timestamp(2, "t", "c", "no"),
            Note::with_timestamp(1, "t", "c", "X1"),
        ];
        let ids: Vec<_> = matcher.filter(notes).into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
