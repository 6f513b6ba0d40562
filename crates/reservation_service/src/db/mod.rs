//! Reservation service schema.
//!
//! # Invariants
//! - User and room reservation rows are removed with their reservation.
//! - Dates are stored as `YYYY-MM-DD` text so equality filters compare exactly.

use hotel_core::db::{DbResult, Migration};
use rusqlite::Connection;

pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("migrations/0001_init.sql"),
}];

pub(crate) const REQUIRED_TABLES: &[&str] =
    &["reservations", "user_reservations", "room_reservations"];

/// Opens (and migrates) the reservation database at `path`.
pub fn open_db(path: impl AsRef<std::path::Path>) -> DbResult<Connection> {
    hotel_core::db::open_db(path, MIGRATIONS)
}

/// Opens a migrated in-memory reservation database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    hotel_core::db::open_db_in_memory(MIGRATIONS)
}
