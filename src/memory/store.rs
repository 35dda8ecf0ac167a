//! Append-only key-value store over a single SQLite file.
//!
//! Records are never updated or deleted in place. Repeated saves under the
//! same key accumulate; `load` returns the most recently inserted value.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by the memory store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be opened or created.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// An insert failed.
    #[error("storage write failed: {0}")]
    Write(String),

    /// A query failed.
    #[error("storage read failed: {0}")]
    Read(String),
}

/// A single stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRecord {
    /// Auto-incrementing identifier assigned by SQLite
    pub id: i64,

    /// Lookup key; not unique, multiple records may share one
    pub key: String,

    /// Arbitrary serialized payload
    pub value: Option<String>,
}

/// SQLite-backed key-value store.
///
/// The connection is owned exclusively by this handle and released when it
/// is dropped, so scoped release falls out of ownership on every exit path.
pub struct MemoryStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl MemoryStore {
    /// Open the store at `path`, creating the file and parent directories
    /// if absent, and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?;
            }
        }

        let conn =
            Connection::open(path).map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Self::init_schema(&conn)?;

        debug!(path = %path.display(), "Memory store opened");

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory store (for tests).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    // Idempotent: safe to run against an existing database.
    fn init_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS memory (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                key TEXT NOT NULL,
                value TEXT
            );",
        )
        .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    /// Path of the backing file, if file-backed.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    /// Append a record. Returns the rowid assigned by SQLite.
    pub fn save(&self, key: &str, value: &str) -> Result<i64, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO memory (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(|e| StoreError::Write(e.to_string()))?;

        Ok(conn.last_insert_rowid())
    }

    /// Fetch the most recently saved value for `key`, or `None` if no
    /// record with that key exists.
    pub fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT value FROM memory WHERE key = ?1 ORDER BY id DESC LIMIT 1",
            params![key],
            |row| row.get::<_, Option<String>>(0),
        )
        .optional()
        .map(|row| row.flatten())
        .map_err(|e| StoreError::Read(e.to_string()))
    }

    /// List recent records, newest first.
    pub fn list(&self, limit: usize) -> Result<Vec<MemoryRecord>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT id, key, value FROM memory ORDER BY id DESC LIMIT ?1")
            .map_err(|e| StoreError::Read(e.to_string()))?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok(MemoryRecord {
                    id: row.get(0)?,
                    key: row.get(1)?,
                    value: row.get(2)?,
                })
            })
            .map_err(|e| StoreError::Read(e.to_string()))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| StoreError::Read(e.to_string()))
    }

    /// Total number of stored records.
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM memory", [], |row| {
            row.get::<_, i64>(0)
        })
        .map(|n| n as usize)
        .map_err(|e| StoreError::Read(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_round_trip() {
        let store = MemoryStore::open_in_memory().unwrap();

        store.save("greeting", "hello").unwrap();
        let value = store.load("greeting").unwrap();

        assert_eq!(value, Some("hello".to_string()));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::open_in_memory().unwrap();
        assert_eq!(store.load("nonexistent").unwrap(), None);
    }

    #[test]
    fn test_load_returns_most_recent() {
        let store = MemoryStore::open_in_memory().unwrap();

        store.save("k", "first").unwrap();
        store.save("k", "second").unwrap();
        store.save("k", "third").unwrap();

        assert_eq!(store.load("k").unwrap(), Some("third".to_string()));
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_save_returns_increasing_rowids() {
        let store = MemoryStore::open_in_memory().unwrap();

        let first = store.save("a", "1").unwrap();
        let second = store.save("b", "2").unwrap();

        assert!(second > first);
    }

    #[test]
    fn test_list_newest_first() {
        let store = MemoryStore::open_in_memory().unwrap();

        store.save("a", "1").unwrap();
        store.save("b", "2").unwrap();

        let records = store.list(10).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, "b");
        assert_eq!(records[1].key, "a");
    }
}
