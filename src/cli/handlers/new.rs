//! New note command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::resolve::resolve_unique;
use super::{open_store, parse_editions, parse_keywords, resolve_ids};
use crate::cli::NewArgs;
use crate::cli::output::{NoteDetail, Output, OutputFormat};
use crate::domain::{Note, NoteDraft, Topic};
use crate::store::{NoteRepository, SqliteStore};

/// Builds the draft for `new` from its arguments.
///
/// With `--inherit`, the parent's keywords and editions come first and the
/// explicitly given ones are added after them.
pub(crate) fn build_draft(args: &NewArgs, store: &SqliteStore) -> Result<NoteDraft> {
    let topic = Topic::new(&args.topic).with_context(|| "invalid topic")?;

    let parent: Option<Note> = args
        .parent
        .as_deref()
        .map(|ident| resolve_unique(store, ident).with_context(|| "failed to resolve parent"))
        .transpose()?;

    let mut draft = match &parent {
        Some(parent) if args.inherit => NoteDraft::child_of(parent, topic),
        Some(parent) => NoteDraft::new(topic).with_parent(parent.id().clone()),
        None => NoteDraft::new(topic),
    };

    if let Some(text) = &args.text {
        draft.text = text.clone();
    }
    draft.keywords.extend(parse_keywords(&args.keywords)?);
    draft.editions.extend(parse_editions(&args.editions)?);
    draft.related.extend(resolve_ids(store, &args.related)?);

    Ok(draft)
}

pub fn handle_new(args: &NewArgs, db_path: &Path) -> Result<()> {
    let mut store = open_store(db_path)?;

    let draft = build_draft(args, &store)?;
    let note = store
        .create_note(&draft)
        .with_context(|| format!("failed to create note '{}'", draft.topic))?;

    match args.format {
        OutputFormat::Human => {
            println!("Created: {}  {} [{}]", note.index(), note.topic(), note.id().prefix());
        }
        OutputFormat::Json => {
            let output = Output::new(NoteDetail {
                note: &note,
                children: Vec::new(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
