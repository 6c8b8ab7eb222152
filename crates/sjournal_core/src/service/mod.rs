//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into journal-level actions.
//! - Keep the CLI decoupled from storage details.

pub mod journal_service;
