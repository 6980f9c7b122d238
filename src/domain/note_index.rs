//! Dot-separated hierarchical note index ("1", "1.2", "1.2.3").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of a note in the hierarchy.
///
/// An index is a non-empty sequence of positive integers. A root note has a
/// single segment; a child's index is its parent's index with one more
/// segment appended.
///
/// # Examples
///
/// ```
/// use folio::domain::NoteIndex;
///
/// let index: NoteIndex = "2.1".parse().unwrap();
/// assert_eq!(index.segments(), &[2, 1]);
/// assert_eq!(index.child(3).to_string(), "2.1.3");
/// assert_eq!(NoteIndex::root(4).to_string(), "4");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NoteIndex {
    segments: Vec<u32>,
}

/// Error returned when parsing an invalid index string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNoteIndexError {
    value: String,
    reason: &'static str,
}

impl ParseNoteIndexError {
    /// Returns the invalid value that caused this error.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseNoteIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid note index '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ParseNoteIndexError {}

impl NoteIndex {
    /// Index of a root note with the given position.
    pub fn root(position: u32) -> Self {
        Self {
            segments: vec![position],
        }
    }

    /// Index of this note's child at the given local position.
    pub fn child(&self, position: u32) -> Self {
        let mut segments = self.segments.clone();
        segments.push(position);
        Self { segments }
    }

    /// Returns the integer segments.
    pub fn segments(&self) -> &[u32] {
        &self.segments
    }

    /// Number of segments; 1 for a root note.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// First segment: the position of the root this index descends from.
    pub fn first(&self) -> u32 {
        self.segments[0]
    }

    /// Last segment: the note's position among its siblings.
    pub fn last(&self) -> u32 {
        self.segments[self.segments.len() - 1]
    }

    /// Returns true if this is a root index.
    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    /// Index of the parent position, if any.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }
}

impl FromStr for NoteIndex {
    type Err = ParseNoteIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| ParseNoteIndexError {
            value: s.to_string(),
            reason,
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(err("index cannot be empty"));
        }

        let mut segments = Vec::new();
        for part in trimmed.split('.') {
            if part.is_empty() {
                return Err(err("segments cannot be empty"));
            }
            if !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(err("segments must be integers"));
            }
            let value: u32 = part.parse().map_err(|_| err("segment out of range"))?;
            if value == 0 {
                return Err(err("segments must be positive"));
            }
            segments.push(value);
        }

        Ok(Self { segments })
    }
}

impl fmt::Display for NoteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl fmt::Debug for NoteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteIndex(\"{}\")", self)
    }
}

impl Serialize for NoteIndex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NoteIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
