//! Artifact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/list/update/delete over the `artifacts` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Values are always bound as `?N` parameters, never spliced into SQL.
//! - Update and delete report `NotFound` when zero rows match.
//! - Listing applies no ordering; row order is whatever SQLite yields.

use crate::db::schema::{current_user_version, ARTIFACTS_TABLE, ARTIFACT_COLUMNS, SCHEMA_VERSION};
use crate::db::DbError;
use crate::error::ErrorKind;
use crate::model::artifact::{Artifact, ArtifactFields, ArtifactId, ISO_DATE_FORMAT};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ARTIFACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    category,
    origin,
    found_date,
    condition,
    quantity,
    unit_weight
FROM artifacts;";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for artifact persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite failure, including constraint violations.
    Db(DbError),
    /// No row carries the requested id.
    NotFound(ArtifactId),
    /// A stored row cannot be mapped back into an `Artifact`.
    InvalidData(String),
    /// Connection schema is not at the expected version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Classifies this error as a store or domain failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::Domain,
            Self::Db(_)
            | Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => ErrorKind::Store,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "artifact with id `{id}` was not found"),
            Self::InvalidData(message) => write!(f, "invalid persisted artifact data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "artifact repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "artifact repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "artifact repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for artifact CRUD operations.
pub trait ArtifactRepository {
    /// Inserts a new row with all attributes of `artifact`.
    fn create_artifact(&self, artifact: &Artifact) -> RepoResult<()>;
    /// Returns every stored artifact in store-defined order.
    fn list_artifacts(&self) -> RepoResult<Vec<Artifact>>;
    /// Replaces all non-id attributes of the row matching `id`.
    ///
    /// The id carried inside `artifact` is ignored.
    fn update_artifact(&self, id: &str, artifact: &Artifact) -> RepoResult<()>;
    /// Removes the row matching `id`.
    fn delete_artifact(&self, id: &str) -> RepoResult<()>;
}

/// SQLite-backed artifact repository.
pub struct SqliteArtifactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArtifactRepository<'conn> {
    /// Creates a repository from a bootstrapped connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ArtifactRepository for SqliteArtifactRepository<'_> {
    fn create_artifact(&self, artifact: &Artifact) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO artifacts (
                id,
                name,
                category,
                origin,
                found_date,
                condition,
                quantity,
                unit_weight
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                artifact.id(),
                artifact.name(),
                artifact.category(),
                artifact.origin(),
                date_to_db(artifact.found_date()),
                artifact.condition(),
                artifact.quantity(),
                artifact.unit_weight(),
            ],
        )?;

        Ok(())
    }

    fn list_artifacts(&self) -> RepoResult<Vec<Artifact>> {
        let mut stmt = self.conn.prepare(ARTIFACT_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut artifacts = Vec::new();

        while let Some(row) = rows.next()? {
            artifacts.push(parse_artifact_row(row)?);
        }

        Ok(artifacts)
    }

    fn update_artifact(&self, id: &str, artifact: &Artifact) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE artifacts
             SET
                name = ?1,
                category = ?2,
                origin = ?3,
                found_date = ?4,
                condition = ?5,
                quantity = ?6,
                unit_weight = ?7
             WHERE id = ?8;",
            params![
                artifact.name(),
                artifact.category(),
                artifact.origin(),
                date_to_db(artifact.found_date()),
                artifact.condition(),
                artifact.quantity(),
                artifact.unit_weight(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }

        Ok(())
    }

    fn delete_artifact(&self, id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM artifacts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

fn parse_artifact_row(row: &Row<'_>) -> RepoResult<Artifact> {
    let id: String = row.get("id")?;

    let date_text: String = row.get("found_date")?;
    let found_date = NaiveDate::parse_from_str(&date_text, ISO_DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date `{date_text}` in artifacts.found_date for id `{id}`"
        ))
    })?;

    let fields = ArtifactFields {
        name: row.get("name")?,
        category: row.get("category")?,
        origin: row.get("origin")?,
        found_date,
        condition: row.get("condition")?,
        quantity: row.get("quantity")?,
        unit_weight: row.get("unit_weight")?,
    };

    Ok(Artifact::new(id, fields))
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version = current_user_version(conn)?;
    if actual_version != SCHEMA_VERSION {
        return Err(RepoError::UninitializedConnection {
            expected_version: SCHEMA_VERSION,
            actual_version,
        });
    }

    if !table_exists(conn, ARTIFACTS_TABLE)? {
        return Err(RepoError::MissingRequiredTable(ARTIFACTS_TABLE));
    }

    for column in ARTIFACT_COLUMNS {
        if !table_has_column(conn, ARTIFACTS_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: ARTIFACTS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
