//! SQLite migration executor.
//!
//! # Responsibility
//! - Apply a service's migration list atomically.
//! - Verify that a connection is on the expected schema before use.
//!
//! # Invariants
//! - `version` values must be strictly increasing within one list.
//! - Applied migration version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// One schema step owned by a service crate.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: u32,
    pub sql: &'static str,
}

/// Returns the latest version in `migrations`.
pub fn latest_version(migrations: &[Migration]) -> u32 {
    migrations.last().map_or(0, |migration| migration.version)
}

/// Brings `conn` up to the last version in `migrations`.
///
/// Pending steps run in one transaction; a database stamped with a newer
/// version than the list knows is refused untouched.
pub fn apply_migrations(conn: &mut Connection, migrations: &[Migration]) -> DbResult<()> {
    debug_assert!(
        migrations.windows(2).all(|pair| pair[0].version < pair[1].version),
        "migration versions must be strictly increasing"
    );

    let from_version = current_user_version(conn)?;
    let target_version = latest_version(migrations);
    if from_version > target_version {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: target_version,
        });
    }

    let pending: Vec<&Migration> = migrations
        .iter()
        .filter(|migration| migration.version > from_version)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in pending {
        tx.execute_batch(migration.sql)?;
        tx.pragma_update(None, "user_version", migration.version)?;
        info!(
            "event=db_migrate module=db status=ok from_version={} to_version={}",
            from_version, migration.version
        );
    }
    tx.commit()?;

    Ok(())
}

/// Checks schema version and required tables before a repository uses `conn`.
pub fn ensure_connection_ready(
    conn: &Connection,
    migrations: &[Migration],
    required_tables: &[&'static str],
) -> DbResult<()> {
    let expected_version = latest_version(migrations);
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(DbError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in required_tables {
        if !table_exists(conn, table)? {
            return Err(DbError::MissingRequiredTable(*table));
        }
    }

    Ok(())
}

pub(crate) fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let mut stmt =
        conn.prepare_cached("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1;")?;
    Ok(stmt.exists([table])?)
}
