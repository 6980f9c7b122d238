//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::Note;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: String,
    pub index: String,
    pub topic: String,
}

impl From<&Note> for NoteListing {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().to_string(),
            index: note.index().to_string(),
            topic: note.topic().to_string(),
        }
    }
}

/// A note with its subtree, for `ls`.
#[derive(Debug, Serialize)]
pub struct NoteTree {
    #[serde(flatten)]
    pub note: NoteListing,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NoteTree>,
}

/// A note with its direct children, for `show` and `new`.
#[derive(Debug, Serialize)]
pub struct NoteDetail<'a> {
    #[serde(flatten)]
    pub note: &'a Note,
    pub children: Vec<NoteListing>,
}
