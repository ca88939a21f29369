//! String-keyed persistent value stores.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rusqlite::OptionalExtension;

use nyumba_core::error::{NyumbaError, Result};

use crate::db::Database;

/// A minimal string-to-string store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

// =============================================================================
// SQLite
// =============================================================================

/// `kv_store` table backed implementation. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    db: Arc<Database>,
}

impl SqliteKeyValueStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn open(path: &std::path::Path) -> Result<Self> {
        Ok(Self::new(Arc::new(Database::new(path)?)))
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(Arc::new(Database::in_memory()?)))
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                rusqlite::params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| NyumbaError::Storage(format!("Failed to read key {}: {}", key, e)))
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%s', 'now'))
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                rusqlite::params![key, value],
            )
            .map_err(|e| NyumbaError::Storage(format!("Failed to write key {}: {}", key, e)))?;
            Ok(())
        })
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// Process-local store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| NyumbaError::Storage(format!("Store lock poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| NyumbaError::Storage(format!("Store lock poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
