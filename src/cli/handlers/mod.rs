//! Command handlers for the CLI.

mod complete;
mod editions;
mod find;
mod list;
mod new;
mod resolve;
mod rm;
mod show_edit;

use anyhow::{Context, Result, anyhow};
use std::path::Path;

use crate::domain::{EditionLink, Keyword, NoteId};
use crate::store::SqliteStore;

// Re-export public items
pub use complete::handle_complete;
pub use editions::handle_edition;
pub use find::handle_find;
pub use list::handle_list;
pub use new::handle_new;
pub use resolve::{ResolveResult, resolve_note};
pub use rm::handle_rm;
pub use show_edit::{handle_edit, handle_show};

// ===========================================
// Shared Utilities
// ===========================================

/// Opens the note store, creating the database on first use.
pub(crate) fn open_store(db_path: &Path) -> Result<SqliteStore> {
    SqliteStore::open(db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))
}

/// Parses `-k` values.
pub(crate) fn parse_keywords(values: &[String]) -> Result<Vec<Keyword>> {
    values
        .iter()
        .map(|v| Keyword::new(v).with_context(|| format!("invalid keyword '{}'", v)))
        .collect()
}

/// Parses `-e` values (`ID` or `ID:annotation`).
pub(crate) fn parse_editions(values: &[String]) -> Result<Vec<EditionLink>> {
    values
        .iter()
        .map(|v| v.parse::<EditionLink>().map_err(|e| anyhow!(e)))
        .collect()
}

/// Resolves every identifier to a note id, failing on the first miss.
pub(crate) fn resolve_ids(store: &SqliteStore, identifiers: &[String]) -> Result<Vec<NoteId>> {
    identifiers
        .iter()
        .map(|ident| resolve::resolve_unique(store, ident).map(|note| note.id().clone()))
        .collect()
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
