//! NoteRepository trait and error types.

use crate::domain::{
    BookEdition, EditionId, Keyword, Note, NoteDraft, NoteId, NoteIndex, NoteUpdate,
};
use crate::hierarchy::ParentViolation;
use crate::store::{NoteFilter, Page, PageRequest};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested note does not exist.
    #[error("note not found: {id}")]
    NoteNotFound { id: String },

    /// The requested book edition does not exist.
    #[error("book edition not found: {id}")]
    EditionNotFound { id: EditionId },

    /// Deletion refused because other notes hang under this one.
    #[error(
        "cannot delete a note with child notes ({children} found); delete or move the child notes first"
    )]
    HasChildren { children: usize },

    /// The requested parent would create a cycle.
    #[error(transparent)]
    InvalidParent(#[from] ParentViolation),

    /// A preset index is already used by another note.
    #[error("index {index} is already assigned to another note")]
    DuplicateIndex { index: String },

    /// A preset index does not match the position implied by the parent.
    #[error("index {index} does not fit under {expected}")]
    IndexMismatch { index: String, expected: String },

    /// A stored index is not a valid dot-separated index.
    #[error("corrupt index '{value}' stored for note {id}")]
    CorruptIndex { id: String, value: String },

    /// A stored value could not be converted into a domain type.
    #[error("invalid data in store: {0}")]
    InvalidData(String),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// True for failures caused by the caller's input rather than the store.
    ///
    /// These are never worth retrying: the input has to change.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            StoreError::NoteNotFound { .. }
                | StoreError::EditionNotFound { .. }
                | StoreError::HasChildren { .. }
                | StoreError::InvalidParent(_)
                | StoreError::DuplicateIndex { .. }
                | StoreError::IndexMismatch { .. }
        )
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A note linked to a book edition, with the link's annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct EditionNote {
    pub note: Note,
    pub additional_info: String,
}

/// Repository trait for notes and their associations.
///
/// Every mutating operation is atomic: it either applies completely or leaves
/// the store untouched.
pub trait NoteRepository {
    /// Persists a new note.
    ///
    /// When the draft carries no index, the next free index under its parent
    /// is assigned while holding the store's write lock, so concurrent
    /// creations never receive the same index.
    fn create_note(&mut self, draft: &NoteDraft) -> StoreResult<Note>;

    /// Retrieves a single note by id.
    fn get_note(&self, id: &NoteId) -> StoreResult<Option<Note>>;

    /// Replaces a note's content and associations.
    ///
    /// The parent is checked with the cycle guard first. The index never
    /// changes, even when the parent does.
    fn update_note(&mut self, id: &NoteId, update: &NoteUpdate) -> StoreResult<Note>;

    /// Checks whether `candidate` may become the parent of the existing note `id`.
    fn validate_parent(
        &self,
        id: &NoteId,
        candidate: Option<&NoteId>,
    ) -> StoreResult<Option<NoteId>>;

    /// Returns true when no note has `id` as its parent.
    fn can_delete(&self, id: &NoteId) -> StoreResult<bool>;

    /// Deletes a childless note together with its edition links.
    ///
    /// Fails with [`StoreError::HasChildren`] and changes nothing when the
    /// note has children.
    fn delete_note(&mut self, id: &NoteId) -> StoreResult<()>;

    /// Direct children of a note, ordered by index text.
    fn children(&self, id: &NoteId) -> StoreResult<Vec<Note>>;

    /// Root notes ordered by creation time, one page at a time.
    fn top_level(&self, page: PageRequest) -> StoreResult<Page<Note>>;

    /// Notes matching every criterion of the filter, ordered by index text.
    fn find_notes(&self, filter: &NoteFilter) -> StoreResult<Vec<Note>>;

    /// Looks a note up by its exact index.
    fn find_by_index(&self, index: &NoteIndex) -> StoreResult<Option<Note>>;

    /// Notes whose id starts with `prefix` (case-insensitive).
    ///
    /// An empty prefix returns an empty result.
    fn find_by_id_prefix(&self, prefix: &str) -> StoreResult<Vec<Note>>;

    /// Notes whose topic or index starts with `query`, newest first.
    fn autocomplete_notes(&self, query: &str, limit: usize) -> StoreResult<Vec<Note>>;

    /// Keywords starting with `query`, alphabetically.
    fn autocomplete_keywords(&self, query: &str, limit: usize) -> StoreResult<Vec<Keyword>>;

    /// Adds a book edition to the catalog.
    fn add_edition(&mut self, title: &str) -> StoreResult<BookEdition>;

    /// Retrieves a book edition by id.
    fn get_edition(&self, id: EditionId) -> StoreResult<Option<BookEdition>>;

    /// All book editions ordered by title.
    fn list_editions(&self) -> StoreResult<Vec<BookEdition>>;

    /// Notes linked to an edition, ordered by index text.
    fn notes_for_edition(&self, id: EditionId) -> StoreResult<Vec<EditionNote>>;
}
