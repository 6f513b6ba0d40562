//! Room service schema.
//!
//! # Invariants
//! - Images and feature links are removed with their room.
//! - A feature that is still linked to a room cannot be deleted.

use hotel_core::db::{DbResult, Migration};
use rusqlite::Connection;

pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("migrations/0001_init.sql"),
}];

pub(crate) const REQUIRED_TABLES: &[&str] =
    &["rooms", "room_features", "images", "room_additional_features"];

/// Opens (and migrates) the room database at `path`.
pub fn open_db(path: impl AsRef<std::path::Path>) -> DbResult<Connection> {
    hotel_core::db::open_db(path, MIGRATIONS)
}

/// Opens a migrated in-memory room database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    hotel_core::db::open_db_in_memory(MIGRATIONS)
}
