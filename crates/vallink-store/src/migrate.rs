use crate::error::{Result, StoreError};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "init",
    sql: include_str!("../migrations/001_init.sql"),
}];

/// Applies every migration newer than the recorded schema version inside a
/// single transaction. Each applied migration leaves a row in
/// `vallink_schema`.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS vallink_schema (
            version INTEGER PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            applied_at INTEGER NOT NULL
        );",
    )?;

    let current = applied_version(&tx)?;
    let latest = MIGRATIONS.last().map_or(0, |migration| migration.version);
    if current > latest {
        return Err(StoreError::Migration(format!(
            "database schema {current} is newer than this build supports ({latest})"
        )));
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tx.execute_batch(migration.sql)?;
        tx.execute(
            "INSERT INTO vallink_schema (version, name, applied_at) VALUES (?1, ?2, ?3);",
            params![migration.version, migration.name, Utc::now().timestamp()],
        )?;
        debug!(version = migration.version, name = migration.name, "migration applied");
    }

    tx.commit()?;
    Ok(())
}

/// Zero for a database that has never been migrated.
pub fn schema_version(conn: &Connection) -> Result<i64> {
    let table: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'vallink_schema';",
            [],
            |row| row.get(0),
        )
        .optional()?;
    match table {
        Some(_) => applied_version(conn),
        None => Ok(0),
    }
}

fn applied_version(conn: &Connection) -> Result<i64> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM vallink_schema;",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}
