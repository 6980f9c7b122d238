//! Book edition command handlers.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::path::Path;

use super::{open_store, truncate_str};
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::cli::{EditionAction, EditionArgs};
use crate::domain::{BookEdition, EditionId};
use crate::store::NoteRepository;

/// A note citing an edition, in `edition show` output.
#[derive(Debug, Serialize)]
struct CitingNote {
    #[serde(flatten)]
    note: NoteListing,
    additional_info: String,
}

#[derive(Debug, Serialize)]
struct EditionDetail {
    #[serde(flatten)]
    edition: BookEdition,
    notes: Vec<CitingNote>,
}

pub fn handle_edition(args: &EditionArgs, db_path: &Path) -> Result<()> {
    let mut store = open_store(db_path)?;

    match &args.action {
        EditionAction::Add { title } => {
            let edition = store
                .add_edition(title)
                .with_context(|| format!("failed to add edition '{}'", title))?;
            println!("Added edition: [{}] {}", edition.id, edition.title);
        }
        EditionAction::List { format } => {
            let editions = store
                .list_editions()
                .with_context(|| "failed to list editions")?;
            match format {
                OutputFormat::Human => {
                    if editions.is_empty() {
                        println!("No editions found.");
                    } else {
                        for edition in &editions {
                            println!("[{}] {}", edition.id, edition.title);
                        }
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&Output::new(editions))?);
                }
            }
        }
        EditionAction::Show { id, format } => {
            let id: EditionId = id
                .parse()
                .with_context(|| format!("invalid edition id '{}'", id))?;
            let Some(edition) = store.get_edition(id)? else {
                bail!("edition not found: {}", id);
            };
            let notes = store
                .notes_for_edition(id)
                .with_context(|| format!("failed to list notes for edition {}", id))?;

            match format {
                OutputFormat::Human => {
                    println!("[{}] {}", edition.id, edition.title);
                    if notes.is_empty() {
                        println!("No notes cite this edition.");
                    }
                    for linked in &notes {
                        let topic = truncate_str(linked.note.topic().as_str(), 50);
                        if linked.additional_info.is_empty() {
                            println!("  {}  {}", linked.note.index(), topic);
                        } else {
                            println!(
                                "  {}  {} ({})",
                                linked.note.index(),
                                topic,
                                linked.additional_info
                            );
                        }
                    }
                }
                OutputFormat::Json => {
                    let detail = EditionDetail {
                        edition,
                        notes: notes
                            .iter()
                            .map(|linked| CitingNote {
                                note: NoteListing::from(&linked.note),
                                additional_info: linked.additional_info.clone(),
                            })
                            .collect(),
                    };
                    println!("{}", serde_json::to_string_pretty(&Output::new(detail))?);
                }
            }
        }
    }

    Ok(())
}
