//! Write transaction guard for the note store.

use crate::store::StoreResult;
use rusqlite::Connection;

/// An open `BEGIN IMMEDIATE` transaction holding the database write lock.
///
/// Every store mutation runs inside one of these. Dropping it without
/// [`Transaction::commit`] rolls back, so a failed step (an unknown
/// edition, a duplicate index) leaves no partial note behind.
pub struct Transaction<'a> {
    conn: &'a Connection,
    committed: bool,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            committed: false,
        }
    }

    /// Connection to run statements on while the lock is held.
    pub(crate) fn conn(&self) -> &'a Connection {
        self.conn
    }

    /// Makes the changes visible and releases the write lock.
    pub fn commit(mut self) -> StoreResult<()> {
        self.conn.execute_batch("COMMIT")?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.committed {
            // Nothing to report to from drop
            let _ = self.conn.execute_batch("ROLLBACK");
        }
    }
}
