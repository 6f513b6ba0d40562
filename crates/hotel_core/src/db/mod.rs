//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for a service.
//! - Apply the service's schema migrations in deterministic order.
//! - Reject connections that were never migrated.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Service code must not read/write application data before migrations succeed.

use chrono::NaiveDateTime;
use thiserror::Error;

pub mod migrations;
mod open;

pub use migrations::{apply_migrations, ensure_connection_ready, latest_version, Migration};
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    #[error("connection is not migrated: expected schema version {expected_version}, found {actual_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
}

/// Timestamp written to `created_at`/`updated_at` audit columns.
pub fn audit_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
