//! Repository and service error types shared by both services.
//!
//! # Invariants
//! - Repositories report missing rows as `RepoError::NotFound`, never as a
//!   generic database failure.
//! - Service errors carry the user-facing message; the storage cause stays
//!   in `source()` for logging.

use crate::db::DbError;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Persistence-layer error.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    /// Returns whether the store rejected the write on a constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Db(DbError::Sqlite(rusqlite::Error::SqliteFailure(err, _)))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

/// Use-case error returned by service layers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Target record (or a referenced record) does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Storage failed in a way the caller cannot fix.
    #[error("{message}")]
    Unexpected {
        message: &'static str,
        #[source]
        source: RepoError,
    },
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Adapter for `map_err` that wraps a repository failure under `message`.
    pub fn unexpected(message: &'static str) -> impl FnOnce(RepoError) -> Self {
        move |source| Self::Unexpected { message, source }
    }
}

#[cfg(test)]
mod tests {
    use super::{RepoError, ServiceError};
    use std::error::Error;

    #[test]
    fn unexpected_keeps_message_and_source() {
        let err = ServiceError::unexpected("Unexpected error while saving room")(
            RepoError::InvalidData("bad enum".to_string()),
        );
        assert_eq!(err.to_string(), "Unexpected error while saving room");
        let source = err.source().expect("source should be kept");
        assert!(source.to_string().contains("bad enum"));
    }

    #[test]
    fn not_found_is_not_a_constraint_violation() {
        let err = RepoError::NotFound {
            entity: "room",
            id: 7,
        };
        assert!(!err.is_constraint_violation());
        assert_eq!(err.to_string(), "room not found: 7");
    }
}
