//! Deletion criteria parsing and resolution.
//!
//! # Responsibility
//! - Turn user tokens such as `3`, `-10` or `5-` into typed criteria.
//! - Resolve criteria into inclusive id ranges against the store's max id.
//!
//! # Invariants
//! - A digits-only token selects exactly that id.
//! - The "below" pattern is tried before the "above" pattern; at most one
//!   interpretation applies per token.
//! - Tokens matching nothing are reported as `Unrecognized`, never as errors.
//!
//! # Grammar
//! The separator class is `\W` (any non-word character) and matching is
//! unanchored, first match only:
//! - below: `\W(\d*)` with non-empty digits -> ids `0..=n`
//! - above: `(\d*)\W` with non-empty digits -> ids `n..=max_id`
//!
//! This means `1-5` reads as "up to 5" and `x5` matches nothing.

use crate::model::note::NoteId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::RangeInclusive;

static EXACT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid exact regex"));
static BELOW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W(\d*)").expect("valid below regex"));
static ABOVE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d*)\W").expect("valid above regex"));

/// One parsed deletion criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Exactly one id.
    Exact(NoteId),
    /// Every id from `0` through the bound, inclusive.
    UpTo(NoteId),
    /// Every id from the bound through the current max id, inclusive.
    StartingAt(NoteId),
    /// Token matched no pattern; carries the raw token.
    Unrecognized(String),
}

impl Criterion {
    /// Resolves this criterion into an inclusive id range.
    ///
    /// Returns `None` for unrecognized tokens, for `StartingAt` on an empty store,
    /// and for `StartingAt` bounds above `max_id`.
    pub fn resolve(&self, max_id: Option<NoteId>) -> Option<RangeInclusive<NoteId>> {
        match self {
            Self::Exact(id) => Some(*id..=*id),
            Self::UpTo(bound) => Some(0..=*bound),
            Self::StartingAt(bound) => {
                let max = max_id?;
                if *bound > max {
                    None
                } else {
                    Some(*bound..=max)
                }
            }
            Self::Unrecognized(_) => None,
        }
    }
}

/// Parses one criteria token.
pub fn parse_token(token: &str) -> Criterion {
    if EXACT_RE.is_match(token) {
        if let Ok(id) = token.parse::<NoteId>() {
            return Criterion::Exact(id);
        }
        return Criterion::Unrecognized(token.to_string());
    }

    if let Some(bound) = first_digit_capture(&BELOW_RE, token) {
        return Criterion::UpTo(bound);
    }

    if let Some(bound) = first_digit_capture(&ABOVE_RE, token) {
        return Criterion::StartingAt(bound);
    }

    Criterion::Unrecognized(token.to_string())
}

/// Parses every token, preserving input order.
pub fn parse_criteria<S: AsRef<str>>(tokens: &[S]) -> Vec<Criterion> {
    tokens.iter().map(|token| parse_token(token.as_ref())).collect()
}

/// Only the first match is considered; an empty digit group means no match
/// even if a later position would have produced digits.
fn first_digit_capture(pattern: &Regex, token: &str) -> Option<NoteId> {
    let digits = pattern.captures(token)?.get(1)?.as_str();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{parse_criteria, parse_token, Criterion};

    #[test]
    fn digits_only_token_is_exact() {
        assert_eq!(parse_token("3"), Criterion::Exact(3));
        assert_eq!(parse_token("0042"), Criterion::Exact(42));
    }

    #[test]
    fn leading_separator_is_open_lower_bound() {
        assert_eq!(parse_token("-10"), Criterion::UpTo(10));
        assert_eq!(parse_token("<4"), Criterion::UpTo(4));
    }

    #[test]
    fn trailing_separator_is_open_upper_bound() {
        assert_eq!(parse_token("5-"), Criterion::StartingAt(5));
        assert_eq!(parse_token("12+"), Criterion::StartingAt(12));
    }

    #[test]
    fn quirk_closed_range_token_reads_as_up_to_second_number() {
        // `1-5` is not a closed range: the below pattern finds `-5` first.
        assert_eq!(parse_token("1-5"), Criterion::UpTo(5));
    }

    #[test]
    fn quirk_below_uses_first_separator_only() {
        // The first `\W` is followed by no digits, so below fails and the
        // above pattern picks up `5-`.
        assert_eq!(parse_token("5--3"), Criterion::StartingAt(5));
    }

    #[test]
    fn quirk_letters_are_not_separators() {
        assert_eq!(parse_token("x5"), Criterion::Unrecognized("x5".to_string()));
        assert_eq!(parse_token("5x"), Criterion::Unrecognized("5x".to_string()));
    }

    #[test]
    fn unmatched_tokens_are_unrecognized() {
        assert_eq!(parse_token("abc"), Criterion::Unrecognized("abc".to_string()));
        assert_eq!(parse_token(""), Criterion::Unrecognized(String::new()));
        assert_eq!(parse_token("-"), Criterion::Unrecognized("-".to_string()));
    }

    #[test]
    fn parse_criteria_keeps_order() {
        let parsed = parse_criteria(&["2", "-1", "9-"]);
        assert_eq!(
            parsed,
            vec![Criterion::Exact(2), Criterion::UpTo(1), Criterion::StartingAt(9)]
        );
    }

    #[test]
    fn resolve_from_uses_max_id() {
        assert_eq!(Criterion::StartingAt(5).resolve(Some(8)), Some(5..=8));
        assert_eq!(Criterion::StartingAt(5).resolve(None), None);
        assert_eq!(Criterion::StartingAt(9).resolve(Some(8)), None);
    }

    #[test]
    fn resolve_up_to_starts_at_zero() {
        assert_eq!(Criterion::UpTo(3).resolve(None), Some(0..=3));
        assert_eq!(Criterion::Exact(7).resolve(None), Some(7..=7));
        assert_eq!(Criterion::Unrecognized("?".into()).resolve(Some(3)), None);
    }
}
