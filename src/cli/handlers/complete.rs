//! Autocomplete command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::open_store;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::cli::{CompleteArgs, CompleteTarget};
use crate::store::NoteRepository;

pub fn handle_complete(args: &CompleteArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;

    match &args.target {
        CompleteTarget::Notes { query } => {
            let notes = store
                .autocomplete_notes(query, args.limit)
                .with_context(|| "failed to complete notes")?;
            match args.format {
                OutputFormat::Human => {
                    for note in &notes {
                        println!("{}\t{}", note.index(), note.topic());
                    }
                }
                OutputFormat::Json => {
                    let listings: Vec<NoteListing> = notes.iter().map(NoteListing::from).collect();
                    println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
                }
            }
        }
        CompleteTarget::Keywords { query } => {
            let keywords = store
                .autocomplete_keywords(query, args.limit)
                .with_context(|| "failed to complete keywords")?;
            match args.format {
                OutputFormat::Human => {
                    for keyword in &keywords {
                        println!("{}", keyword);
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&Output::new(keywords))?);
                }
            }
        }
    }

    Ok(())
}
