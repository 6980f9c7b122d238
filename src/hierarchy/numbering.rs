//! Next-index computation for new notes.

use crate::domain::NoteIndex;

/// Computes the index for a new note.
///
/// - Root note (`parent` is `None`): one past the highest first segment among
///   the existing root notes.
/// - Child note: the parent's index extended with one past the highest last
///   segment among the parent's existing children.
///
/// With no siblings the local position is 1. Gaps between siblings are never
/// filled, but deleting the highest sibling frees its number again.
///
/// The caller must hold a lock over the sibling set from this read until the
/// new note is written, or two writers can compute the same index.
///
/// # Examples
///
/// ```
/// use folio::domain::NoteIndex;
/// use folio::hierarchy::next_index;
///
/// let parent: NoteIndex = "2".parse().unwrap();
/// let siblings: Vec<NoteIndex> = vec!["2.1".parse().unwrap(), "2.3".parse().unwrap()];
/// assert_eq!(next_index(Some(&parent), &siblings).to_string(), "2.4");
/// assert_eq!(next_index(None, &[]).to_string(), "1");
/// ```
pub fn next_index<'a, I>(parent: Option<&NoteIndex>, siblings: I) -> NoteIndex
where
    I: IntoIterator<Item = &'a NoteIndex>,
{
    match parent {
        None => {
            let max = siblings.into_iter().map(NoteIndex::first).max().unwrap_or(0);
            NoteIndex::root(max.saturating_add(1))
        }
        Some(parent) => {
            let max = siblings.into_iter().map(NoteIndex::last).max().unwrap_or(0);
            parent.child(max.saturating_add(1))
        }
    }
}
