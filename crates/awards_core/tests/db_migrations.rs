use awards_core::db::migrations::{latest_version, schema_version};
use awards_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "movies");
}

#[test]
fn opening_same_database_twice_is_idempotent_and_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("awards.sqlite3");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO movies (release_year, title, studios, producers, winner)
             VALUES (1984, 'Bolero', 'Cannon Films', 'Bo Derek', 1);",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second).unwrap(), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM movies;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failed_migration_reports_version_and_keeps_schema_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE movies (
            id INTEGER PRIMARY KEY,
            release_year INTEGER NOT NULL,
            title TEXT NOT NULL
        );",
    )
    .unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match &err {
        DbError::Migration { version, name, .. } => {
            assert_eq!(*version, 1);
            assert_eq!(*name, "movies");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("migration 1 `movies` failed"));

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), 0);
}

#[test]
fn opened_connection_sets_busy_timeout_without_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let timeout_ms: i64 = conn
        .query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(timeout_ms, 5000);

    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 0);
}

#[test]
fn winner_column_rejects_values_other_than_zero_or_one() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO movies (release_year, title, winner) VALUES (1990, 'x', 2);",
        [],
    );
    assert!(result.is_err());
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
