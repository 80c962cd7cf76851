//! # Database Error Types
//!
//! Crate-level error type for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ClassifiedError (classify.rs) ← vendor codes read only here           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← + validation, connection, migration, config   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  API layer (external) maps each kind to a response                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use depot_core::ValidationError;
use thiserror::Error;

use crate::classify::{self, ClassifiedError, ErrorClassifier};
use crate::config::ConfigError;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// A statement failed or matched nothing; see [`ClassifiedError`].
    #[error(transparent)]
    Classified(#[from] ClassifiedError),

    /// Input rejected before any SQL ran.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    ///
    /// ## When This Occurs
    /// - Invalid SQL in migration
    /// - Migration version conflict (an applied file was edited)
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Environment configuration could not be read.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl DbError {
    /// The classified kind, if this error came from a statement.
    pub fn classified(&self) -> Option<&ClassifiedError> {
        match self {
            DbError::Classified(err) => Some(err),
            _ => None,
        }
    }
}

/// Convert sqlx errors to DbError through the SQLite classifier.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound       → Classified(NotFound)
/// sqlx::Error::Database(2067)    → Classified(Duplicate)
/// sqlx::Error::Database(787)     → Classified(ForeignKeyViolation)
/// Other                          → Classified(TransientDatabaseFailure)
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::Classified(classify::sqlite().classify(err))
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
