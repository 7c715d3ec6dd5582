//! Repository contracts and shared persistence error taxonomy.
//!
//! # Responsibility
//! - Define the generic CRUD seam composed into entity services.
//! - Classify store-level failures into the caller-facing taxonomy.
//!
//! # Invariants
//! - Lookups signal "not found" with `Ok(None)`; deletes with `Ok(false)`.
//!   `RepoError::NotFound` is reserved for writes against missing rows.
//! - Constraint failures carry enough context (entity, operation) to
//!   diagnose without a stack trace.

use crate::db::DbError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod company_repo;
pub mod contact_repo;
pub mod job_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence and query error for all tracker repositories.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A write targeted a row that does not exist.
    NotFound(Uuid),
    /// A unique key collided, e.g. a duplicate company name.
    Uniqueness {
        entity: &'static str,
        detail: String,
    },
    /// A delete was refused because dependent rows still reference the
    /// target.
    ReferentialIntegrity {
        entity: &'static str,
        detail: String,
    },
    /// Any other store-level constraint failure, e.g. a foreign key
    /// violation on insert.
    Constraint {
        operation: &'static str,
        detail: String,
    },
    /// Persisted state failed to parse back into the domain model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "row not found: {id}"),
            Self::Uniqueness { entity, detail } => {
                write!(f, "uniqueness violation on {entity}: {detail}")
            }
            Self::ReferentialIntegrity { entity, detail } => {
                write!(f, "cannot delete {entity}: {detail}")
            }
            Self::Constraint { operation, detail } => {
                write!(f, "constraint violation during {operation}: {detail}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
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

/// Generic CRUD seam shared by every entity repository.
///
/// Entity-specific traits extend this with their own write and query
/// operations; services compose against the traits, never the SQLite
/// types directly.
pub trait Repository {
    type Entity;

    fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Self::Entity>>;
    fn find_all(&self) -> RepoResult<Vec<Self::Entity>>;
    /// Removes one row, returning whether it existed.
    fn delete(&mut self, id: Uuid) -> RepoResult<bool>;
}

/// Classifies a SQLite failure from a write statement.
///
/// Unique-key and primary-key collisions become `Uniqueness`; other
/// constraint failures (foreign keys, checks) become `Constraint`;
/// everything else stays a database error.
pub(crate) fn classify_write_error(
    entity: &'static str,
    operation: &'static str,
    err: rusqlite::Error,
) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, ref message) = err {
        if failure.code == ErrorCode::ConstraintViolation {
            let detail = message
                .clone()
                .unwrap_or_else(|| "constraint violated".to_string());
            return match failure.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => RepoError::Uniqueness {
                    entity,
                    detail,
                },
                _ => RepoError::Constraint { operation, detail },
            };
        }
    }
    RepoError::Db(DbError::Sqlite(err))
}

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}
