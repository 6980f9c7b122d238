//! Core types: Note, NoteId (ULID), NoteIndex, Topic, Keyword, editions

mod edition;
mod keyword;
mod note;
mod note_id;
mod note_index;
mod topic;

pub use edition::{BookEdition, EditionId, EditionLink};
pub use keyword::{Keyword, ParseKeywordError};
pub use note::{Note, NoteBuilder, NoteDraft, NoteUpdate};
pub use note_id::{NoteId, ParseNoteIdError};
pub use note_index::{NoteIndex, ParseNoteIndexError};
pub use topic::{Topic, TopicError};
