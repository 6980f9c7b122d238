//! Parent validation: a note must never become its own ancestor.

use crate::domain::NoteId;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// A parent assignment that would break the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParentViolation {
    #[error("circular dependency: a note cannot be its own parent")]
    SelfParent,

    #[error("circular dependency: the parent note cannot be a descendant of this note")]
    DescendantParent,

    /// The ancestor chain above the candidate already loops.
    #[error("circular dependency: the ancestors of note {0} form a loop")]
    ExistingCycle(NoteId),
}

/// Read access to the parent relation.
///
/// The error type must absorb [`ParentViolation`] so that lookup failures and
/// rule violations travel through one channel.
pub trait ParentLookup {
    type Error: From<ParentViolation>;

    /// Returns the parent of `id`, or `None` for a root note.
    fn parent_of(&self, id: &NoteId) -> Result<Option<NoteId>, Self::Error>;
}

/// Child-to-parent map; absent keys are roots.
impl ParentLookup for HashMap<NoteId, NoteId> {
    type Error = ParentViolation;

    fn parent_of(&self, id: &NoteId) -> Result<Option<NoteId>, Self::Error> {
        Ok(self.get(id).cloned())
    }
}

/// Checks that `candidate` may become the parent of the existing note `note`.
///
/// Fails when the candidate is the note itself, or when walking up from the
/// candidate reaches the note (the candidate is one of its descendants).
/// Reaching a root ends the walk successfully. `None` (detaching the note)
/// always passes.
///
/// The guard does not touch the note's index.
pub fn validate_parent<L>(
    note: &NoteId,
    candidate: Option<&NoteId>,
    lookup: &L,
) -> Result<Option<NoteId>, L::Error>
where
    L: ParentLookup + ?Sized,
{
    let Some(candidate) = candidate else {
        return Ok(None);
    };

    if candidate == note {
        return Err(ParentViolation::SelfParent.into());
    }

    let mut visited = HashSet::new();
    let mut current = candidate.clone();
    loop {
        if !visited.insert(current.clone()) {
            return Err(ParentViolation::ExistingCycle(candidate.clone()).into());
        }
        match lookup.parent_of(&current)? {
            None => return Ok(Some(candidate.clone())),
            Some(parent) if &parent == note => {
                return Err(ParentViolation::DescendantParent.into());
            }
            Some(parent) => current = parent,
        }
    }
}
