//! Note record plus the draft and update shapes used to write it.

use crate::domain::{EditionId, EditionLink, Keyword, NoteId, NoteIndex, Topic};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted note.
///
/// # Fields
/// - `id`: opaque identity
/// - `index`: hierarchical position, fixed at creation
/// - `parent`: the note this one hangs under, `None` for root notes
/// - `topic`, `text`: content
/// - `keywords`, `editions`, `related`: associations
/// - `created_at`, `updated_at`: maintained by the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    id: NoteId,
    index: NoteIndex,
    parent: Option<NoteId>,
    topic: Topic,
    text: String,
    keywords: Vec<Keyword>,
    editions: Vec<EditionLink>,
    related: Vec<NoteId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a builder with the required fields.
    pub fn builder(
        id: NoteId,
        index: NoteIndex,
        topic: Topic,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> NoteBuilder {
        NoteBuilder {
            note: Note {
                id,
                index,
                parent: None,
                topic,
                text: String::new(),
                keywords: Vec::new(),
                editions: Vec::new(),
                related: Vec::new(),
                created_at,
                updated_at,
            },
        }
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn index(&self) -> &NoteIndex {
        &self.index
    }

    pub fn parent(&self) -> Option<&NoteId> {
        self.parent.as_ref()
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    /// Note body; empty when the note has no text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Keywords in alphabetical order.
    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn editions(&self) -> &[EditionLink] {
        &self.editions
    }

    /// Cross-linked notes (informational, not hierarchy).
    pub fn related(&self) -> &[NoteId] {
        &self.related
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Builder for [`Note`], used by storage backends when hydrating rows.
pub struct NoteBuilder {
    note: Note,
}

impl NoteBuilder {
    pub fn parent(mut self, parent: Option<NoteId>) -> Self {
        self.note.parent = parent;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.note.text = text.into();
        self
    }

    pub fn keywords(mut self, keywords: Vec<Keyword>) -> Self {
        self.note.keywords = keywords;
        self
    }

    pub fn editions(mut self, editions: Vec<EditionLink>) -> Self {
        self.note.editions = editions;
        self
    }

    pub fn related(mut self, related: Vec<NoteId>) -> Self {
        self.note.related = related;
        self
    }

    pub fn build(self) -> Note {
        self.note
    }
}

/// Everything needed to create a note.
///
/// `index` is normally left empty so the store assigns the next free position
/// under `parent`. A preset index is kept only if it sits directly under
/// the parent's index (or at the root level for root drafts).
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDraft {
    pub topic: Topic,
    pub text: String,
    pub parent: Option<NoteId>,
    pub index: Option<NoteIndex>,
    pub keywords: Vec<Keyword>,
    pub editions: Vec<EditionLink>,
    pub related: Vec<NoteId>,
}

impl NoteDraft {
    /// A root-level draft with only a topic.
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            text: String::new(),
            parent: None,
            index: None,
            keywords: Vec::new(),
            editions: Vec::new(),
            related: Vec::new(),
        }
    }

    /// A draft placed under `parent`, inheriting its keywords and editions.
    ///
    /// Inherited edition links start with an empty annotation.
    pub fn child_of(parent: &Note, topic: Topic) -> Self {
        Self {
            parent: Some(parent.id().clone()),
            keywords: parent.keywords().to_vec(),
            editions: parent
                .editions()
                .iter()
                .map(|link| EditionLink::new(link.edition, ""))
                .collect(),
            ..Self::new(topic)
        }
    }

    pub fn with_parent(mut self, parent: NoteId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keywords.push(keyword);
        self
    }

    pub fn with_edition(mut self, edition: EditionId, additional_info: impl Into<String>) -> Self {
        self.editions.push(EditionLink::new(edition, additional_info));
        self
    }

    pub fn with_related(mut self, note: NoteId) -> Self {
        self.related.push(note);
        self
    }
}

/// Replacement values for an existing note.
///
/// Every field overwrites the stored one. Seed it with
/// [`NoteUpdate::from_note`] and change only what should differ. The index
/// and creation time are not part of an update.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteUpdate {
    pub topic: Topic,
    pub text: String,
    pub parent: Option<NoteId>,
    pub keywords: Vec<Keyword>,
    pub editions: Vec<EditionLink>,
    pub related: Vec<NoteId>,
}

impl NoteUpdate {
    pub fn from_note(note: &Note) -> Self {
        Self {
            topic: note.topic().clone(),
            text: note.text().to_string(),
            parent: note.parent().cloned(),
            keywords: note.keywords().to_vec(),
            editions: note.editions().to_vec(),
            related: note.related().to_vec(),
        }
    }
}
