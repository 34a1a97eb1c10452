//! SQLite-backed key-value storage adapter.
//!
//! # Responsibility
//! - Persist serialized collections in the `kv_store` table.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Construction rejects connections that have not been migrated.
//! - `save` is an upsert; `updated_at` tracks the last write.

use super::{StorageAdapter, StorageError, StorageResult};
use crate::db::migrations::latest_version;
use rusqlite::{params, Connection, OptionalExtension};

const KV_TABLE: &str = "kv_store";

/// Key-value adapter over a migrated rusqlite connection.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Wraps a migrated connection, verifying schema readiness first.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not
    ///   match the latest migration.
    /// - `MissingRequiredTable` when the kv table is absent.
    pub fn try_new(conn: Connection) -> StorageResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self { conn })
    }

    /// Consumes the adapter and returns the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

impl StorageAdapter for SqliteStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> StorageResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StorageError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
        params![KV_TABLE],
        |row| row.get(0),
    )?;
    if table_count == 0 {
        return Err(StorageError::MissingRequiredTable(KV_TABLE));
    }

    Ok(())
}
