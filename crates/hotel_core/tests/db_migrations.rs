use hotel_core::db::{
    ensure_connection_ready, latest_version, open_db, open_db_in_memory, DbError, Migration,
};
use rusqlite::Connection;

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: "CREATE TABLE parents (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL);",
    },
    Migration {
        version: 2,
        sql: "CREATE TABLE children (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                parent_id INTEGER NOT NULL REFERENCES parents(id) ON DELETE CASCADE
              );",
    },
];

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory(MIGRATIONS).unwrap();

    assert_eq!(schema_version(&conn), latest_version(MIGRATIONS));
    ensure_connection_ready(&conn, MIGRATIONS, &["parents", "children"]).unwrap();
}

#[test]
fn opened_connections_enforce_foreign_keys() {
    let conn = open_db_in_memory(MIGRATIONS).unwrap();

    let err = conn
        .execute("INSERT INTO children (parent_id) VALUES (42);", [])
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hotel.db");

    let conn_first = open_db(&path, MIGRATIONS).unwrap();
    conn_first
        .execute("INSERT INTO parents (name) VALUES ('kept');", [])
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path, MIGRATIONS).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version(MIGRATIONS));
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM parents;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path, MIGRATIONS).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version(MIGRATIONS));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn readiness_check_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match ensure_connection_ready(&conn, MIGRATIONS, &["parents"]) {
        Err(DbError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, 2),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(()) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn readiness_check_rejects_missing_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        latest_version(MIGRATIONS)
    ))
    .unwrap();

    let result = ensure_connection_ready(&conn, MIGRATIONS, &["parents"]);
    assert!(matches!(
        result,
        Err(DbError::MissingRequiredTable("parents"))
    ));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
