//! Content search over retrieved notes.
//!
//! # Responsibility
//! - Build case-insensitive wildcard patterns from user search terms.
//! - Filter candidate notes after the store query has been applied.

pub mod matcher;
