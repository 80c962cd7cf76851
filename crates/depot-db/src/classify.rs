//! # Driver Error Classification
//!
//! Maps raw sqlx errors onto a small, backend-agnostic taxonomy.
//!
//! ## Classification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     sqlx::Error → ClassifiedError                       │
//! │                                                                         │
//! │  Database(code ∈ duplicate codes)    → Duplicate                       │
//! │  Database(code ∈ foreign key codes)  → ForeignKeyViolation             │
//! │  RowNotFound                         → NotFound                        │
//! │  Ok(0 rows affected)                 → NoRowsAffected (signal only)    │
//! │  anything else                       → TransientDatabaseFailure(err)   │
//! │                                                                         │
//! │  Vendor codes:   SQLite extended      Postgres SQLSTATE                │
//! │    duplicate     2067, 1555           23505                            │
//! │    foreign key   787                  23503                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing outside this module branches on vendor codes. Supporting another
//! backend means adding another [`CodeTableClassifier`] constant.

use sqlx::error::ErrorKind;
use thiserror::Error;

// =============================================================================
// Classified Error
// =============================================================================

/// Normalized database failure.
#[derive(Debug, Error)]
pub enum ClassifiedError {
    /// Unique constraint violated. Callers report "already exists".
    #[error("Duplicate entry: {detail}")]
    Duplicate { detail: String },

    /// Referenced row is missing.
    #[error("Foreign key violation: {detail}")]
    ForeignKeyViolation { detail: String },

    /// Target row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The statement matched zero rows. Not an error by itself; the caller
    /// decides whether the row is missing or already held the values.
    #[error("No rows affected")]
    NoRowsAffected,

    /// Everything else: connection loss, malformed SQL, busy database.
    /// The driver error is kept as the source.
    #[error("Database failure: {0}")]
    TransientDatabaseFailure(#[source] sqlx::Error),
}

impl ClassifiedError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        ClassifiedError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Replaces the detail of a constraint violation with caller context.
    ///
    /// Other kinds are returned unchanged.
    pub fn with_detail(self, detail: impl Into<String>) -> Self {
        match self {
            ClassifiedError::Duplicate { .. } => ClassifiedError::Duplicate {
                detail: detail.into(),
            },
            ClassifiedError::ForeignKeyViolation { .. } => ClassifiedError::ForeignKeyViolation {
                detail: detail.into(),
            },
            other => other,
        }
    }

    /// Fills in entity and id on a NotFound produced without context.
    pub fn for_entity(self, entity: &str, id: impl ToString) -> Self {
        match self {
            ClassifiedError::NotFound { .. } => ClassifiedError::not_found(entity, id),
            other => other,
        }
    }
}

// =============================================================================
// Classifier
// =============================================================================

/// Constraint families recognized from vendor codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Unique,
    ForeignKey,
}

/// Turns driver errors into [`ClassifiedError`]s.
///
/// Implementors only map vendor codes; the provided methods handle the rest.
pub trait ErrorClassifier: Send + Sync {
    /// Looks up a vendor error code.
    fn constraint_for_code(&self, code: &str) -> Option<Constraint>;

    /// Classifies a driver error. Pure; never swallows the error.
    fn classify(&self, err: sqlx::Error) -> ClassifiedError {
        let constraint = match &err {
            sqlx::Error::RowNotFound => {
                return ClassifiedError::not_found("Record", "unknown");
            }
            sqlx::Error::Database(db_err) => db_err
                .code()
                .and_then(|code| self.constraint_for_code(&code))
                .or(match db_err.kind() {
                    ErrorKind::UniqueViolation => Some(Constraint::Unique),
                    ErrorKind::ForeignKeyViolation => Some(Constraint::ForeignKey),
                    _ => None,
                })
                .map(|constraint| (constraint, db_err.message().to_string())),
            _ => None,
        };

        match constraint {
            Some((Constraint::Unique, detail)) => ClassifiedError::Duplicate { detail },
            Some((Constraint::ForeignKey, detail)) => {
                ClassifiedError::ForeignKeyViolation { detail }
            }
            None => ClassifiedError::TransientDatabaseFailure(err),
        }
    }

    /// Classifies an execute outcome together with its row-count hint.
    ///
    /// `Ok(0)` becomes [`ClassifiedError::NoRowsAffected`]; whether that means
    /// "missing" or "unchanged" is left to the caller.
    fn classify_rows(&self, outcome: Result<u64, sqlx::Error>) -> Result<u64, ClassifiedError> {
        match outcome {
            Ok(0) => Err(ClassifiedError::NoRowsAffected),
            Ok(rows) => Ok(rows),
            Err(err) => Err(self.classify(err)),
        }
    }
}

/// Classifier driven by fixed tables of vendor codes.
#[derive(Debug, Clone, Copy)]
pub struct CodeTableClassifier {
    pub duplicate_codes: &'static [&'static str],
    pub foreign_key_codes: &'static [&'static str],
}

impl CodeTableClassifier {
    /// SQLite extended result codes (`SQLITE_CONSTRAINT_*`).
    pub const SQLITE: CodeTableClassifier = CodeTableClassifier {
        duplicate_codes: &["2067", "1555"],
        foreign_key_codes: &["787"],
    };

    /// Postgres SQLSTATE codes.
    pub const POSTGRES: CodeTableClassifier = CodeTableClassifier {
        duplicate_codes: &["23505"],
        foreign_key_codes: &["23503"],
    };
}

impl ErrorClassifier for CodeTableClassifier {
    fn constraint_for_code(&self, code: &str) -> Option<Constraint> {
        if self.duplicate_codes.contains(&code) {
            Some(Constraint::Unique)
        } else if self.foreign_key_codes.contains(&code) {
            Some(Constraint::ForeignKey)
        } else {
            None
        }
    }
}

/// The classifier matching this crate's SQLite backend.
pub fn sqlite() -> &'static CodeTableClassifier {
    &CodeTableClassifier::SQLITE
}

// =============================================================================
// Unit Tests
// =============================================================================
