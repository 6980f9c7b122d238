//! Note storage: repository trait, SQLite backend, filters and pagination

mod filter;
mod page;
mod repository;
pub mod schema;
mod sqlite;

pub use filter::{Comparison, FieldSpec, FilterField, NoteFilter, Target};
pub use page::{Page, PageRequest};
pub use repository::{EditionNote, NoteRepository, StoreError, StoreResult};
pub use schema::{create_schema, get_schema_version};
pub use sqlite::{SqliteStore, Transaction};
