//! Artifact table definition and bootstrap.
//!
//! # Responsibility
//! - Create the `artifacts` table on first open.
//! - Refuse databases written by a newer schema.
//!
//! # Invariants
//! - There is exactly one schema version; no upgrade chain exists.
//! - Bootstrap is idempotent for an already-initialized database.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Schema version written to `PRAGMA user_version` after bootstrap.
pub const SCHEMA_VERSION: u32 = 1;

/// Name of the single table holding artifact rows.
pub const ARTIFACTS_TABLE: &str = "artifacts";

/// Column names of [`ARTIFACTS_TABLE`] in declaration order.
pub const ARTIFACT_COLUMNS: [&str; 8] = [
    "id",
    "name",
    "category",
    "origin",
    "found_date",
    "condition",
    "quantity",
    "unit_weight",
];

const ARTIFACTS_SQL: &str = include_str!("artifacts.sql");

/// Creates the artifact table when missing and stamps the schema version.
pub fn apply_schema(conn: &Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;

    if current_version > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            supported_version: SCHEMA_VERSION,
        });
    }

    if current_version == SCHEMA_VERSION {
        return Ok(());
    }

    conn.execute_batch(ARTIFACTS_SQL)?;
    conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    Ok(())
}

/// Reads `PRAGMA user_version` from the connection.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
