//! Query composition for list/search use-cases.
//!
//! # Responsibility
//! - Translate loosely-typed request options (category, quantity, all,
//!   reverse) into an executable [`NoteQuery`].
//!
//! # Invariants
//! - `all` disables the limit regardless of any quantity given.
//! - Without quantity or `all`, the caller-supplied default limit applies.
//! - Reversal is applied after limiting, never before.

use crate::repo::note_repo::NoteQuery;

/// Default row cap of the `list` use-case.
pub const DEFAULT_LIST_LIMIT: u32 = 5;

/// Row cap given either as a scalar or as a list of numbers.
///
/// Both forms describe the same limit; a list contributes its first element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quantity {
    Scalar(u32),
    List(Vec<u32>),
}

impl Quantity {
    /// Resolves the effective cap. An empty list means "unspecified".
    pub fn resolve(&self) -> Option<u32> {
        match self {
            Self::Scalar(value) => Some(*value),
            Self::List(values) => values.first().copied(),
        }
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<u32>> for Quantity {
    fn from(values: Vec<u32>) -> Self {
        Self::List(values)
    }
}

/// Caller-facing options shared by list and search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub category: Option<String>,
    pub quantity: Option<Quantity>,
    pub all: bool,
    pub reverse: bool,
}

impl ListOptions {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_quantity(mut self, quantity: impl Into<Quantity>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    pub fn all(mut self) -> Self {
        self.all = true;
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// Builds a store query plan from options.
///
/// `default_limit` applies only when neither a quantity nor `all` is given;
/// `list` passes [`DEFAULT_LIST_LIMIT`], `search` passes `None`.
pub fn build_query(options: &ListOptions, default_limit: Option<u32>) -> NoteQuery {
    let limit = if options.all {
        None
    } else {
        options
            .quantity
            .as_ref()
            .and_then(Quantity::resolve)
            .or(default_limit)
    };

    NoteQuery {
        category: options.category.clone(),
        limit,
        reverse: options.reverse,
    }
}
