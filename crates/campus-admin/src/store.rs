//! SQLite persistence for sectors and classes.

use crate::config::DatabaseConfig;
use rusqlite::{Connection, ErrorCode, Transaction};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS sectors(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS classes(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    class_name TEXT NOT NULL,
    description TEXT NOT NULL,
    sector_id INTEGER NOT NULL,
    FOREIGN KEY(sector_id) REFERENCES sectors(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_classes_sector ON classes(sector_id);
CREATE INDEX IF NOT EXISTS idx_classes_name ON classes(class_name);
";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("database connection lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// True when a UNIQUE (or other) constraint rejected the write.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            StoreError::Sqlite(rusqlite::Error::SqliteFailure(failure, _)) => {
                failure.code == ErrorCode::ConstraintViolation
            }
            _ => false,
        }
    }
}

/// Single shared connection. Writes run inside a transaction that commits only
/// when the closure succeeds.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(config: &DatabaseConfig) -> Result<Self, StoreError> {
        if config.is_in_memory() {
            return Self::in_memory();
        }
        Self::open_path(Path::new(config.path.trim()))
    }

    pub fn open_path(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened sqlite database");
        Self::initialize(conn)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        debug!("opened in-memory sqlite database");
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self, StoreError> {
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Runs a read-only closure without opening a transaction.
    pub fn read<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<StoreError>,
    {
        let guard = self.lock()?;
        operation(&*guard)
    }

    /// Runs the closure inside a transaction. An `Err` drops the transaction,
    /// which rolls back every statement the closure executed.
    pub fn write<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut guard = self.lock()?;
        let tx = guard.transaction().map_err(StoreError::from)?;
        let value = operation(&tx)?;
        tx.commit().map_err(StoreError::from)?;
        Ok(value)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}
