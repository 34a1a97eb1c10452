//! Persistence adapter contract and implementations.
//!
//! # Responsibility
//! - Define the key-value storage seam used by the Wardrobe store.
//! - Keep the core independent of any concrete storage medium.
//!
//! # Invariants
//! - Values are opaque JSON text; adapters never inspect them.
//! - `load` of an unknown key is `Ok(None)`, not an error.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite;

pub use sqlite::SqliteStorage;

/// Storage key for the serialized catalogue array.
pub const CATALOGUE_KEY: &str = "accessories";
/// Storage key for the serialized schedule index object.
pub const SCHEDULE_KEY: &str = "schedule";

pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage adapter implementations.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying SQLite/bootstrap error.
    Db(crate::db::DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing from the connection.
    MissingRequiredTable(&'static str),
    /// Adapter-specific failure (quota, medium unavailable, injected).
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "storage requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "storage requires table `{table}`")
            }
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::Backend(_) => None,
        }
    }
}

impl From<crate::db::DbError> for StorageError {
    fn from(value: crate::db::DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(crate::db::DbError::Sqlite(value))
    }
}

/// Durable key-value store contract for the Wardrobe.
///
/// Implementations persist whole serialized collections under well-known
/// keys. The core calls `load` once per key at startup and `save` after
/// every effective mutation.
pub trait StorageAdapter {
    /// Loads the value stored under `key`, or `None` when absent.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Durably stores `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// Owned adapter handle as stored by the Wardrobe.
///
/// `Send` so a store instance can live behind a process-wide lock at the
/// FFI boundary.
pub type BoxedStorage = Box<dyn StorageAdapter + Send>;

/// Volatile in-memory adapter.
///
/// The analogue of an in-memory database connection: useful for tests and
/// throwaway stores. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct read access for assertions on persisted bytes.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Pre-seeds a value, e.g. to simulate previously stored data.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl StorageAdapter for MemoryStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
