//! SQLite schema for the notes store.

use rusqlite::Connection;

/// Current schema version recorded in `schema_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the database schema for the notes store.
///
/// Idempotent: calling it on an existing database is safe.
///
/// # Tables Created
/// - `notes` - Note rows; `idx` is the unique hierarchical index
/// - `keywords` - Shared keyword words
/// - `note_keywords` - Many-to-many junction for notes and keywords
/// - `note_relations` - Symmetric cross-links, stored once with `note_a < note_b`
/// - `book_editions` - Minimal edition catalog referenced by notes
/// - `note_editions` - Annotated note/edition links
/// - `schema_version` - Schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // Children block deletion of their parent (RESTRICT)
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS notes (
            id TEXT PRIMARY KEY,
            idx TEXT NOT NULL UNIQUE,
            parent_id TEXT REFERENCES notes(id) ON DELETE RESTRICT,
            topic TEXT NOT NULL CHECK (length(topic) BETWEEN 1 AND 255),
            text TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS keywords (
            id INTEGER PRIMARY KEY,
            word TEXT NOT NULL UNIQUE
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS note_keywords (
            note_id TEXT NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
            keyword_id INTEGER NOT NULL REFERENCES keywords(id) ON DELETE CASCADE,
            PRIMARY KEY (note_id, keyword_id)
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS note_relations (
            note_a TEXT NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
            note_b TEXT NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
            PRIMARY KEY (note_a, note_b),
            CHECK (note_a < note_b)
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS book_editions (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL
        );",
    )?;

    // Edition links are removed explicitly before their note (RESTRICT)
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS note_editions (
            note_id TEXT NOT NULL REFERENCES notes(id) ON DELETE RESTRICT,
            edition_id INTEGER NOT NULL REFERENCES book_editions(id) ON DELETE RESTRICT,
            additional_info TEXT NOT NULL DEFAULT '',
            PRIMARY KEY (note_id, edition_id)
        );",
    )?;

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_notes_parent ON notes(parent_id);
         CREATE INDEX IF NOT EXISTS idx_notes_created ON notes(created_at);
         CREATE INDEX IF NOT EXISTS idx_note_editions_edition ON note_editions(edition_id);",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Returns the current schema version.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}
