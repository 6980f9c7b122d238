//! Note resolution utilities.

use anyhow::{Context, Result, bail};

use crate::domain::{Note, NoteIndex};
use crate::store::NoteRepository;

/// Result of resolving a note identifier.
#[derive(Debug)]
pub enum ResolveResult {
    /// Exactly one note matched.
    Unique(Note),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<Note>),
    /// No notes matched.
    NotFound,
}

impl From<Vec<Note>> for ResolveResult {
    fn from(matches: Vec<Note>) -> Self {
        match <[Note; 1]>::try_from(matches) {
            Ok([note]) => ResolveResult::Unique(note),
            Err(matches) if matches.is_empty() => ResolveResult::NotFound,
            Err(matches) => ResolveResult::Ambiguous(matches),
        }
    }
}

/// Prints the candidates of an ambiguous identifier so the user can pick one.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[Note]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        eprintln!("  {}  {} - {}", note.id().prefix(), note.index(), note.topic());
    }
    eprintln!();
    eprintln!("Use a longer ID prefix or the note's index.");
}

/// Resolves a note identifier to a unique note.
///
/// Resolution order:
/// 1. Exact index ("2.1")
/// 2. ID prefix (at least 4 characters; a full ID is a prefix of itself)
///
/// An index match wins outright: indices are unique.
pub fn resolve_note<R: NoteRepository>(store: &R, identifier: &str) -> Result<ResolveResult> {
    let identifier = identifier.trim();

    if let Ok(index) = identifier.parse::<NoteIndex>()
        && let Some(note) = store
            .find_by_index(&index)
            .with_context(|| "failed to search by index")?
    {
        return Ok(ResolveResult::Unique(note));
    }

    let looks_like_id =
        identifier.len() >= 4 && identifier.chars().all(|c| c.is_ascii_alphanumeric());
    if !looks_like_id {
        return Ok(ResolveResult::NotFound);
    }

    let id_matches = store
        .find_by_id_prefix(identifier)
        .with_context(|| "failed to search by ID prefix")?;
    Ok(id_matches.into())
}

/// Resolves an identifier or fails with a message naming it.
pub(crate) fn resolve_unique<R: NoteRepository>(store: &R, identifier: &str) -> Result<Note> {
    match resolve_note(store, identifier)? {
        ResolveResult::Unique(note) => Ok(note),
        ResolveResult::Ambiguous(notes) => {
            print_ambiguous_notes(identifier, &notes);
            bail!("ambiguous note identifier: '{}'", identifier);
        }
        ResolveResult::NotFound => {
            bail!("note not found: '{}'", identifier);
        }
    }
}
