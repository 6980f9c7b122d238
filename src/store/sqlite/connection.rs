//! Connection management for SqliteStore.

use super::SqliteStore;
use super::transaction::Transaction;
use crate::store::{StoreError, StoreResult, create_schema};
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// How long a writer waits for another connection's write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

impl SqliteStore {
    // ===========================================
    // In-Memory Connection
    // ===========================================

    /// Opens an in-memory database with the notes schema.
    ///
    /// This is useful for testing and throwaway stores.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        configure(&conn)?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    // ===========================================
    // File-Based Connection
    // ===========================================

    /// Opens or creates a database at the given path.
    ///
    /// Creates parent directories if they don't exist. Initializes the schema
    /// if this is a new database.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        configure(&conn)?;
        create_schema(&conn)?;
        tracing::debug!(path = %path.display(), "opened note store");
        Ok(Self { conn })
    }

    // ===========================================
    // Connection Accessors
    // ===========================================

    /// Returns a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // ===========================================
    // Transaction Support
    // ===========================================

    /// Begins a write transaction.
    ///
    /// Uses `BEGIN IMMEDIATE`, taking the database write lock up front: every
    /// read made inside the transaction is protected from concurrent writers
    /// until commit or rollback. Rolls back on drop unless `commit()` is
    /// called.
    pub fn transaction(&mut self) -> StoreResult<Transaction<'_>> {
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(Transaction::new(&self.conn))
    }
}

/// Per-connection settings: foreign keys, lock waiting, SQL helpers.
fn configure(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;

    // SQLite's LIKE and lower() only fold ASCII
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|s| s.to_lowercase()))
        },
    )?;

    Ok(())
}
