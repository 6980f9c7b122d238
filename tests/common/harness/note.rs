//! Builder for test notes with sensible defaults.

use folio::domain::{EditionId, Keyword, Note, NoteDraft, NoteId, Topic};

/// Builder for creating test notes with sensible defaults.
///
/// Only the topic is required; the store assigns the index when the note
/// is added to a [`super::TestEnv`].
#[derive(Debug)]
pub struct TestNote {
    topic: String,
    text: String,
    parent: Option<NoteId>,
    keywords: Vec<Keyword>,
    editions: Vec<(EditionId, String)>,
}

impl TestNote {
    /// Creates a new root-level test note with the given topic.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            text: String::new(),
            parent: None,
            keywords: Vec::new(),
            editions: Vec::new(),
        }
    }

    /// Places the note under an already stored note.
    pub fn under(mut self, parent: &Note) -> Self {
        self.parent = Some(parent.id().clone());
        self
    }

    /// Sets the body text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Adds a keyword to the note.
    pub fn keyword(mut self, word: impl AsRef<str>) -> Self {
        self.keywords
            .push(Keyword::new(word.as_ref()).expect("Invalid keyword"));
        self
    }

    /// Links the note to an edition.
    pub fn edition(mut self, id: EditionId, info: impl Into<String>) -> Self {
        self.editions.push((id, info.into()));
        self
    }

    /// Returns the topic.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Converts this TestNote to a draft for the store.
    pub fn to_draft(&self) -> NoteDraft {
        let topic = Topic::new(&self.topic).expect("TestNote topic should be valid");
        let mut draft = NoteDraft::new(topic).with_text(self.text.clone());
        if let Some(parent) = &self.parent {
            draft = draft.with_parent(parent.clone());
        }
        for keyword in &self.keywords {
            draft = draft.with_keyword(keyword.clone());
        }
        for (id, info) in &self.editions {
            draft = draft.with_edition(*id, info.clone());
        }
        draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_new_with_topic() {
        let note = TestNote::new("Nicomachean Ethics");
        assert_eq!(note.topic(), "Nicomachean Ethics");
        assert!(note.to_draft().parent.is_none());
    }

    #[test]
    fn test_note_builder_fluent() {
        let draft = TestNote::new("Book II")
            .text("Virtue is a mean.")
            .keyword("virtue")
            .keyword("mean")
            .edition(EditionId::new(1), "1106b")
            .to_draft();

        assert_eq!(draft.topic.as_str(), "Book II");
        assert_eq!(draft.text, "Virtue is a mean.");
        assert_eq!(draft.keywords.len(), 2);
        assert_eq!(draft.editions[0].additional_info, "1106b");
        assert!(draft.index.is_none());
    }
}
