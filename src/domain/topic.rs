//! Note topic: the required, length-limited headline of a note.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a topic was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopicError {
    #[error("topic is required")]
    Empty,

    #[error("topic must not exceed {max} characters (got {len})", max = Topic::MAX_LEN)]
    TooLong { len: usize },
}

/// The headline of a note.
///
/// # Validation Rules
/// - Surrounding whitespace is trimmed
/// - Non-empty after trimming
/// - At most [`Topic::MAX_LEN`] characters (counted as chars, not bytes)
///
/// # Examples
///
/// ```
/// use folio::domain::Topic;
///
/// let topic = Topic::new("  On the shortness of life ").unwrap();
/// assert_eq!(topic.as_str(), "On the shortness of life");
/// assert!(Topic::new("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Topic(String);

impl Topic {
    /// Maximum topic length in characters.
    pub const MAX_LEN: usize = 255;

    /// Creates a validated topic.
    pub fn new(s: &str) -> Result<Self, TopicError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TopicError::Empty);
        }

        let len = trimmed.chars().count();
        if len > Self::MAX_LEN {
            return Err(TopicError::TooLong { len });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the topic text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Topic({:?})", self.0)
    }
}

impl Serialize for Topic {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Topic {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Topic::new(&s).map_err(serde::de::Error::custom)
    }
}
