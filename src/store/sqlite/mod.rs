//! SQLite-backed note store.

mod connection;
mod editions;
mod notes;
mod rows;
mod transaction;


use rusqlite::Connection;

pub use transaction::Transaction;

/// SQLite-backed note store.
///
/// Owns one connection. Several stores (in several threads or processes) may
/// open the same database file; note creation serializes on SQLite's write
/// lock.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}
