//! SQLite connection management.
//!
//! Wraps a single rusqlite Connection in a Mutex. Configures WAL mode and
//! runs migrations on open.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::info;

use nyumba_core::error::NyumbaError;

use crate::migrations;

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a database at the given path.
    pub fn new(path: &Path) -> Result<Self, NyumbaError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| NyumbaError::Storage(format!("Failed to open database: {}", e)))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| NyumbaError::Storage(format!("Failed to set pragmas: {}", e)))?;

        info!("Database opened at {}", path.display());
        Self::with_migrations(conn)
    }

    /// Open an in-memory database (for testing).
    pub fn in_memory() -> Result<Self, NyumbaError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| NyumbaError::Storage(format!("Failed to open in-memory db: {}", e)))?;
        Self::with_migrations(conn)
    }

    fn with_migrations(conn: Connection) -> Result<Self, NyumbaError> {
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.with_conn(migrations::run_migrations)?;
        Ok(db)
    }

    /// Run `f` with exclusive access to the connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, NyumbaError>
    where
        F: FnOnce(&Connection) -> Result<T, NyumbaError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| NyumbaError::Storage(format!("Database lock poisoned: {}", e)))?;
        f(&conn)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}
