//! Remove command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::open_store;
use super::resolve::resolve_unique;
use crate::cli::RmArgs;
use crate::store::NoteRepository;

pub fn handle_rm(args: &RmArgs, db_path: &Path) -> Result<()> {
    let mut store = open_store(db_path)?;
    let note = resolve_unique(&store, &args.note)?;

    store
        .delete_note(note.id())
        .with_context(|| format!("failed to delete note {}", note.index()))?;

    println!("Deleted: {}  {} [{}]", note.index(), note.topic(), note.id().prefix());
    Ok(())
}
