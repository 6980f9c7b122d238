//! Find command handler.

use anyhow::{Context, Result, bail};
use std::path::Path;

use super::{open_store, truncate_str};
use crate::cli::FindArgs;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::{EditionId, NoteIndex};
use crate::store::{FilterField, NoteFilter, NoteRepository};

/// Turns the `find` flags into a filter, validating typed values up front.
pub(crate) fn build_filter(args: &FindArgs) -> Result<NoteFilter> {
    if let Some(index) = &args.index {
        index
            .parse::<NoteIndex>()
            .with_context(|| "invalid --index filter")?;
    }
    if let Some(edition) = &args.edition {
        edition
            .parse::<EditionId>()
            .with_context(|| format!("invalid --edition filter '{}'", edition))?;
    }

    let fields = [
        (FilterField::Topic, &args.topic),
        (FilterField::Text, &args.text),
        (FilterField::Index, &args.index),
        (FilterField::Keyword, &args.keyword),
        (FilterField::Edition, &args.edition),
    ];

    Ok(fields
        .into_iter()
        .filter_map(|(field, value)| value.as_ref().map(|v| (field, v)))
        .fold(NoteFilter::new(), |filter, (field, value)| {
            filter.with(field, value.as_str())
        }))
}

pub fn handle_find(args: &FindArgs, db_path: &Path) -> Result<()> {
    let filter = build_filter(args)?;
    if filter.is_empty() {
        bail!("give at least one of --topic, --text, --index, --keyword, --edition");
    }

    let store = open_store(db_path)?;
    let notes = store
        .find_notes(&filter)
        .with_context(|| "failed to search notes")?;

    match args.format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
            } else {
                println!("{:<10}  {:<12}  {:<50}", "ID", "Index", "Topic");
                println!(
                    "{:<10}  {:<12}  {:<50}",
                    "----------",
                    "------------",
                    "--------------------------------------------------"
                );
                for note in &notes {
                    println!(
                        "{:<10}  {:<12}  {:<50}",
                        note.id().prefix(),
                        note.index().to_string(),
                        truncate_str(note.topic().as_str(), 50)
                    );
                }
                println!();
                println!("{} note(s)", notes.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(NoteListing::from).collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }

    Ok(())
}
