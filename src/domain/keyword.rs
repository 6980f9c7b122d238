//! Keyword type shared between notes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A keyword attached to notes.
///
/// Keywords are stored once and shared: attaching the same word to two notes
/// references the same keyword row. Case is preserved; surrounding
/// whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use folio::domain::Keyword;
///
/// let keyword = Keyword::new("  stoicism ").unwrap();
/// assert_eq!(keyword.as_str(), "stoicism");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keyword(String);

/// Error returned when parsing an invalid keyword.
#[derive(Debug, Clone)]
pub struct ParseKeywordError(String);

impl fmt::Display for ParseKeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseKeywordError {}

impl Keyword {
    /// Maximum keyword length in characters.
    pub const MAX_LEN: usize = 100;

    /// Creates a new Keyword from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseKeywordError` if the word is empty after trimming or
    /// longer than [`Keyword::MAX_LEN`] characters.
    pub fn new(s: &str) -> Result<Self, ParseKeywordError> {
        let word = s.trim();

        if word.is_empty() {
            return Err(ParseKeywordError("keyword cannot be empty".to_string()));
        }

        if word.chars().count() > Self::MAX_LEN {
            return Err(ParseKeywordError(format!(
                "keyword '{}' is longer than {} characters",
                word,
                Self::MAX_LEN
            )));
        }

        Ok(Self(word.to_string()))
    }

    /// Returns the keyword as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword(\"{}\")", self.0)
    }
}

impl FromStr for Keyword {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Keyword {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Keyword {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
