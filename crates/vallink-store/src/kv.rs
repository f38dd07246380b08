use crate::backend::{check_quota, KeyValueBackend};
use crate::error::Result;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value table inside the SQLite database.
pub struct SqliteKv<'a> {
    conn: &'a Connection,
    quota: Option<usize>,
}

impl<'a> SqliteKv<'a> {
    pub fn new(conn: &'a Connection, quota: Option<usize>) -> Self {
        Self { conn, quota }
    }

    fn bytes_excluding(&self, key: &str) -> Result<usize> {
        let total: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
             FROM kv
             WHERE key != ?1;",
            [key],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(total).unwrap_or(0))
    }
}

impl KeyValueBackend for SqliteKv<'_> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.quota.is_some() {
            check_quota(self.quota, self.bytes_excluding(key)?, key, value)?;
        }
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at;",
            params![key, value, Utc::now().timestamp()],
        )?;
        Ok(())
    }
}
