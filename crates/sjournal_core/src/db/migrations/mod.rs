//! Ordered schema steps for journal files.
//!
//! The applied step is recorded in `PRAGMA user_version`; a fresh file and a
//! legacy untracked journal both start at 0.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "notes_table",
    sql: include_str!("0001_notes.sql"),
}];

/// Schema version a fully upgraded journal carries.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Reads the schema version recorded in a journal file.
pub fn journal_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings the journal up to [`latest_version`] and returns how many steps ran.
///
/// All pending steps share one transaction, so a failed step leaves the
/// journal at its previous version.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<usize> {
    let found = journal_version(conn)?;
    let target = latest_version();
    if found > target {
        return Err(DbError::NewerJournal {
            found,
            readable: target,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > found)
        .collect();
    if pending.is_empty() {
        debug!("event=journal_schema module=db status=current version={found}");
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for step in &pending {
        debug!(
            "event=journal_schema module=db status=step version={} name={}",
            step.version, step.name
        );
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    info!(
        "event=journal_schema module=db status=upgraded from={found} to={target} steps={}",
        pending.len()
    );
    Ok(pending.len())
}
