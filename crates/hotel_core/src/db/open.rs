//! SQLite connection bootstrap.
//!
//! # Invariants
//! - Returned connections enforce foreign keys.
//! - Returned connections carry every migration of the owning service.

use super::migrations::{apply_migrations, current_user_version, Migration};
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
enum Location<'a> {
    File(&'a Path),
    Memory,
}

impl Location<'_> {
    fn label(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }

    fn connect(&self) -> rusqlite::Result<Connection> {
        match self {
            Self::File(path) => Connection::open(path),
            Self::Memory => Connection::open_in_memory(),
        }
    }
}

/// Opens (creating if needed) the database file at `path` and migrates it.
pub fn open_db(path: impl AsRef<Path>, migrations: &[Migration]) -> DbResult<Connection> {
    open_at(Location::File(path.as_ref()), migrations)
}

/// Opens a private in-memory database and migrates it.
///
/// Data lives as long as the returned connection.
pub fn open_db_in_memory(migrations: &[Migration]) -> DbResult<Connection> {
    open_at(Location::Memory, migrations)
}

fn open_at(location: Location<'_>, migrations: &[Migration]) -> DbResult<Connection> {
    let started_at = Instant::now();
    let result = location
        .connect()
        .map_err(DbError::from)
        .and_then(|mut conn| prepare(&mut conn, migrations).map(|version| (conn, version)));

    match result {
        Ok((conn, schema_version)) => {
            info!(
                "event=db_open module=db status=ok mode={} schema_version={} duration_ms={}",
                location.label(),
                schema_version,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error={}",
                location.label(),
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn prepare(conn: &mut Connection, migrations: &[Migration]) -> DbResult<u32> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn, migrations)?;
    current_user_version(conn)
}
