//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the note store contract used by journal use-cases.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Every mutating call commits before returning.
//! - Repository APIs return semantic errors (`DuplicateId`, `NotFound`) in
//!   addition to DB transport errors.

pub mod note_repo;
