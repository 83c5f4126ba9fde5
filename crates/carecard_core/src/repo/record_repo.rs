//! Record store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide fetch/save/list over the canonical `records` table.
//! - Support identity renames for the normalization migration.
//!
//! # Invariants
//! - `save` validates identity normalization and field limits first.
//! - `save` upserts by identity; the stored casing follows the last write.
//! - Reads tolerate legacy unnormalized identities so the migration can
//!   repair them, but reject rows with an empty identity.
//! - Blank text columns read back as `None`.

use crate::config::FieldLimits;
use crate::db::DbError;
use crate::model::record::{non_blank, Record, RecordValidationError};
use crate::text::normalize::normalize_scientific_name;
use log::{error, info};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const RECORD_SELECT_SQL: &str = "SELECT
    identity,
    common_name,
    description,
    light,
    water,
    feeding,
    temperature,
    humidity,
    toxicity,
    card_path
FROM records";

pub type RepoResult<T> = Result<T, RepoError>;

/// Record store error.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    Db(DbError),
    NotFound(String),
    /// Another record already holds this identity (case-insensitively).
    IdentityConflict(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(identity) => write!(f, "record not found: {identity}"),
            Self::IdentityConflict(identity) => {
                write!(f, "another record already uses identity `{identity}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::IdentityConflict(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
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

/// Persistence boundary for records.
pub trait RecordStore {
    /// Looks a record up by identity, ignoring case.
    fn fetch(&self, identity: &str) -> RepoResult<Option<Record>>;
    /// Inserts or replaces the record stored under `record.identity`.
    fn save(&self, record: &Record) -> RepoResult<()>;
    /// Lists all records, most recently updated first.
    fn list(&self) -> RepoResult<Vec<Record>>;
    /// Rewrites a stored identity key.
    fn rename_identity(&self, current: &str, renamed: &str) -> RepoResult<()>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn fetch(&self, identity: &str) -> RepoResult<Option<Record>> {
        (**self).fetch(identity)
    }

    fn save(&self, record: &Record) -> RepoResult<()> {
        (**self).save(record)
    }

    fn list(&self) -> RepoResult<Vec<Record>> {
        (**self).list()
    }

    fn rename_identity(&self, current: &str, renamed: &str) -> RepoResult<()> {
        (**self).rename_identity(current, renamed)
    }
}

/// SQLite-backed record store.
pub struct SqliteRecordRepository<'conn> {
    conn: &'conn Connection,
    limits: FieldLimits,
}

impl<'conn> SqliteRecordRepository<'conn> {
    /// Creates a repository over a migrated connection, validating writes
    /// against `limits`.
    pub fn new(conn: &'conn Connection, limits: FieldLimits) -> Self {
        Self { conn, limits }
    }

    pub fn limits(&self) -> &FieldLimits {
        &self.limits
    }
}

impl RecordStore for SqliteRecordRepository<'_> {
    fn fetch(&self, identity: &str) -> RepoResult<Option<Record>> {
        let key = normalize_scientific_name(identity);
        let mut stmt = self
            .conn
            .prepare(&format!("{RECORD_SELECT_SQL} WHERE identity = ?1;"))?;

        let mut rows = stmt.query([key.as_str()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_record_row(row)?));
        }

        Ok(None)
    }

    fn save(&self, record: &Record) -> RepoResult<()> {
        record.validate(&self.limits)?;

        let result = self.conn.execute(
            "INSERT INTO records (
                identity,
                common_name,
                description,
                light,
                water,
                feeding,
                temperature,
                humidity,
                toxicity,
                card_path
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ON CONFLICT(identity) DO UPDATE SET
                identity = excluded.identity,
                common_name = excluded.common_name,
                description = excluded.description,
                light = excluded.light,
                water = excluded.water,
                feeding = excluded.feeding,
                temperature = excluded.temperature,
                humidity = excluded.humidity,
                toxicity = excluded.toxicity,
                card_path = excluded.card_path,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                record.identity.as_str(),
                record.common_name.as_deref(),
                record.description.as_deref(),
                record.light.as_deref(),
                record.water.as_deref(),
                record.feeding.as_deref(),
                record.temperature.as_deref(),
                record.humidity.as_deref(),
                record.toxicity.as_deref(),
                record.card_path.as_deref(),
            ],
        );

        match result {
            Ok(_) => {
                info!(
                    "event=record_save module=repo status=ok identity={}",
                    record.identity
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=record_save module=repo status=error identity={} error={}",
                    record.identity, err
                );
                Err(err.into())
            }
        }
    }

    fn list(&self) -> RepoResult<Vec<Record>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RECORD_SELECT_SQL} ORDER BY updated_at DESC, id DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }

    fn rename_identity(&self, current: &str, renamed: &str) -> RepoResult<()> {
        let result = self.conn.execute(
            "UPDATE records
             SET
                identity = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE identity = ?1;",
            params![current, renamed],
        );

        match result {
            Ok(0) => Err(RepoError::NotFound(current.to_string())),
            Ok(_) => Ok(()),
            Err(err) if is_constraint_violation(&err) => {
                Err(RepoError::IdentityConflict(renamed.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn parse_record_row(row: &Row<'_>) -> RepoResult<Record> {
    let identity: String = row.get("identity")?;
    if identity.trim().is_empty() {
        return Err(RepoError::InvalidData(
            "empty identity in records.identity".to_string(),
        ));
    }

    Ok(Record {
        identity,
        common_name: optional_text(row, "common_name")?,
        description: optional_text(row, "description")?,
        light: optional_text(row, "light")?,
        water: optional_text(row, "water")?,
        feeding: optional_text(row, "feeding")?,
        temperature: optional_text(row, "temperature")?,
        humidity: optional_text(row, "humidity")?,
        toxicity: optional_text(row, "toxicity")?,
        card_path: optional_text(row, "card_path")?,
    })
}

// Blank columns read as absent.
fn optional_text(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<String>> {
    Ok(row.get::<_, Option<String>>(column)?.and_then(non_blank))
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation
    )
}
