//! Journal domain model.
//!
//! # Responsibility
//! - Define the single persisted record (`Note`) and its identity type.
//! - Own timestamp formatting shared by storage and rendering.
//!
//! # Invariants
//! - Every note is identified by an integer `NoteId` unique within a journal.
//! - Recency is defined by id order, never by timestamp text.

pub mod note;
