//! Ordered schema steps for the grocery tables.
//!
//! `PRAGMA user_version` holds the number of the last applied step. Opening
//! a database runs every step above that number inside one transaction, so
//! a half-upgraded file is never committed.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

// Append only. Versions are contiguous from 1.
const STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "lists_and_notes",
        sql: include_str!("0001_init.sql"),
    },
    SchemaStep {
        version: 2,
        name: "items",
        sql: include_str!("0002_items.sql"),
    },
];

/// Schema version this build brings databases up to.
pub fn target_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Brings `conn` up to [`target_version`].
///
/// # Errors
/// - `SchemaTooNew` when the file is ahead of this build.
/// - `Migration` naming the step that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let target = target_version();
    if found > target {
        return Err(DbError::SchemaTooNew {
            found,
            supported: target,
        });
    }

    let pending = STEPS.iter().filter(|step| step.version > found);
    let tx = conn.transaction()?;
    let mut applied = 0;
    for step in pending {
        tx.execute_batch(step.sql)
            .and_then(|()| tx.pragma_update(None, "user_version", step.version))
            .map_err(|source| DbError::Migration {
                version: step.version,
                name: step.name,
                source,
            })?;
        applied += 1;
    }
    tx.commit()?;

    if applied > 0 {
        info!("event=db_migrate module=db status=ok from={found} to={target} steps={applied}");
    }
    Ok(())
}
