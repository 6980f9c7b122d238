//! Book editions and the annotated links between notes and editions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a book edition in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditionId(i64);

impl EditionId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EditionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A catalog entry that notes can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookEdition {
    pub id: EditionId,
    pub title: String,
}

/// A note's reference to a book edition, with a free-text annotation
/// (page range, chapter, quote location, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditionLink {
    pub edition: EditionId,
    pub additional_info: String,
}

impl EditionLink {
    pub fn new(edition: EditionId, additional_info: impl Into<String>) -> Self {
        Self {
            edition,
            additional_info: additional_info.into(),
        }
    }
}

impl FromStr for EditionLink {
    type Err = String;

    /// Parses `ID` or `ID:annotation`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, info) = match s.split_once(':') {
            Some((id, info)) => (id, info.trim()),
            None => (s, ""),
        };
        let edition = id
            .parse::<EditionId>()
            .map_err(|e| format!("invalid edition id '{}': {}", id.trim(), e))?;
        Ok(Self::new(edition, info))
    }
}
