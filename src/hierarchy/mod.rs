//! Tree rules for notes: index numbering and parent validation.
//!
//! Both pieces are storage-agnostic. The store supplies sibling indices and
//! parent lookups; these functions decide.

mod guard;
mod numbering;

pub use guard::{ParentLookup, ParentViolation, validate_parent};
pub use numbering::next_index;
