//! Show and Edit command handlers.

use anyhow::{Context, Result};
use std::path::Path;

use super::resolve::resolve_unique;
use super::{open_store, parse_editions, parse_keywords, resolve_ids};
use crate::cli::output::{NoteDetail, NoteListing, Output, OutputFormat};
use crate::cli::{EditArgs, ShowArgs};
use crate::domain::{Note, NoteUpdate, Topic};
use crate::store::{NoteRepository, SqliteStore};

pub fn handle_show(args: &ShowArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;
    let note = resolve_unique(&store, &args.note)?;
    let children = store
        .children(note.id())
        .with_context(|| format!("failed to list children of {}", note.index()))?;

    match args.format {
        OutputFormat::Human => print_note(&store, &note, &children)?,
        OutputFormat::Json => {
            let output = Output::new(NoteDetail {
                note: &note,
                children: children.iter().map(NoteListing::from).collect(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn print_note(store: &SqliteStore, note: &Note, children: &[Note]) -> Result<()> {
    println!("# {}  {}", note.index(), note.topic());
    println!();

    println!(
        "ID: {}  Created: {}  Modified: {}",
        note.id().prefix(),
        note.created_at().format("%Y-%m-%d"),
        note.updated_at().format("%Y-%m-%d")
    );

    if let Some(parent_id) = note.parent()
        && let Some(parent) = store.get_note(parent_id)?
    {
        println!("Parent: {}  {}", parent.index(), parent.topic());
    }

    if !note.keywords().is_empty() {
        let words: Vec<_> = note.keywords().iter().map(|k| k.as_str()).collect();
        println!("Keywords: {}", words.join(", "));
    }

    if !note.editions().is_empty() {
        println!("Editions:");
        for link in note.editions() {
            let title = store
                .get_edition(link.edition)?
                .map(|e| e.title)
                .unwrap_or_else(|| "?".to_string());
            if link.additional_info.is_empty() {
                println!("  [{}] {}", link.edition, title);
            } else {
                println!("  [{}] {} ({})", link.edition, title, link.additional_info);
            }
        }
    }

    if !note.related().is_empty() {
        println!("Related:");
        for id in note.related() {
            if let Some(related) = store.get_note(id)? {
                println!("  {}  {}", related.index(), related.topic());
            }
        }
    }

    if !children.is_empty() {
        println!("Children:");
        for child in children {
            println!("  {}  {}", child.index(), child.topic());
        }
    }

    if !note.text().is_empty() {
        println!();
        println!("{}", note.text());
    }

    Ok(())
}

/// Applies the `edit` flags on top of the stored values.
pub(crate) fn build_update(
    args: &EditArgs,
    store: &SqliteStore,
    note: &Note,
) -> Result<NoteUpdate> {
    let mut update = NoteUpdate::from_note(note);

    if let Some(topic) = &args.topic {
        update.topic = Topic::new(topic).with_context(|| "invalid topic")?;
    }
    if let Some(text) = &args.text {
        update.text = text.clone();
    }

    if args.no_parent {
        update.parent = None;
    } else if let Some(ident) = &args.parent {
        let parent =
            resolve_unique(store, ident).with_context(|| "failed to resolve parent")?;
        update.parent = Some(parent.id().clone());
    }

    if args.clear_keywords {
        update.keywords.clear();
    } else if !args.keywords.is_empty() {
        update.keywords = parse_keywords(&args.keywords)?;
    }

    if args.clear_editions {
        update.editions.clear();
    } else if !args.editions.is_empty() {
        update.editions = parse_editions(&args.editions)?;
    }

    if args.clear_related {
        update.related.clear();
    } else if !args.related.is_empty() {
        update.related = resolve_ids(store, &args.related)?;
    }

    Ok(update)
}

pub fn handle_edit(args: &EditArgs, db_path: &Path) -> Result<()> {
    let mut store = open_store(db_path)?;
    let note = resolve_unique(&store, &args.note)?;

    let update = build_update(args, &store, &note)?;
    let updated = store
        .update_note(note.id(), &update)
        .with_context(|| format!("failed to update note {}", note.index()))?;

    println!(
        "Updated: {}  {} [{}]",
        updated.index(),
        updated.topic(),
        updated.id().prefix()
    );
    Ok(())
}
