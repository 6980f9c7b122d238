//! NoteRepository implementation for SqliteStore.

use super::SqliteStore;
use super::editions::{
    all_editions, fetch_edition, insert_edition, link_editions, notes_linked_to, unlink_editions,
};
use super::rows::{
    ConnLookup, child_count, format_timestamp, index_of, load_note, load_notes, query_ids,
    require_note, sibling_indices,
};
use crate::domain::{
    BookEdition, EditionId, Keyword, Note, NoteDraft, NoteId, NoteIndex, NoteUpdate,
};
use crate::hierarchy::{next_index, validate_parent};
use crate::store::filter::escape_like;
use crate::store::{
    EditionNote, NoteFilter, NoteRepository, Page, PageRequest, StoreError, StoreResult,
};
use chrono::Utc;
use rusqlite::{Connection, ErrorCode};

impl NoteRepository for SqliteStore {
    #[tracing::instrument(level = "debug", skip_all, fields(parent = ?draft.parent))]
    fn create_note(&mut self, draft: &NoteDraft) -> StoreResult<Note> {
        // Write lock from here to commit: sibling read and insert are one unit
        let tx = self.transaction()?;
        let conn = tx.conn();

        let parent_index = draft
            .parent
            .as_ref()
            .map(|parent| index_of(conn, parent))
            .transpose()?;

        let index = match &draft.index {
            Some(preset) => {
                check_preset_index(preset, parent_index.as_ref())?;
                preset.clone()
            }
            None => {
                let siblings = sibling_indices(conn, draft.parent.as_ref())?;
                next_index(parent_index.as_ref(), &siblings)
            }
        };

        let id = NoteId::new();
        let now = format_timestamp(Utc::now());
        conn.execute(
            "INSERT INTO notes (id, idx, parent_id, topic, text, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            rusqlite::params![
                id.to_string(),
                index.to_string(),
                draft.parent.as_ref().map(|p| p.to_string()),
                draft.topic.as_str(),
                draft.text,
                now,
            ],
        )
        .map_err(|e| duplicate_index_or(e, &index))?;

        write_keywords(conn, &id, &draft.keywords)?;
        link_editions(conn, &id, &draft.editions)?;
        write_relations(conn, &id, &draft.related)?;

        tx.commit()?;
        tracing::info!(note = %id, index = %index, "created note");

        load_note(&self.conn, &id)?.ok_or_else(|| StoreError::NoteNotFound { id: id.to_string() })
    }

    fn get_note(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        load_note(&self.conn, id)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(note = %id))]
    fn update_note(&mut self, id: &NoteId, update: &NoteUpdate) -> StoreResult<Note> {
        let tx = self.transaction()?;
        let conn = tx.conn();

        require_note(conn, id)?;
        if let Err(e) = validate_parent(id, update.parent.as_ref(), &ConnLookup(conn)) {
            tracing::warn!(note = %id, error = %e, "rejected parent change");
            return Err(e);
        }

        conn.execute(
            "UPDATE notes SET topic = ?2, text = ?3, parent_id = ?4, updated_at = ?5
             WHERE id = ?1",
            rusqlite::params![
                id.to_string(),
                update.topic.as_str(),
                update.text,
                update.parent.as_ref().map(|p| p.to_string()),
                format_timestamp(Utc::now()),
            ],
        )?;

        conn.execute(
            "DELETE FROM note_keywords WHERE note_id = ?1",
            [id.to_string()],
        )?;
        unlink_editions(conn, id)?;
        conn.execute(
            "DELETE FROM note_relations WHERE note_a = ?1 OR note_b = ?1",
            [id.to_string()],
        )?;

        write_keywords(conn, id, &update.keywords)?;
        link_editions(conn, id, &update.editions)?;
        write_relations(conn, id, &update.related)?;

        tx.commit()?;
        tracing::info!(note = %id, "updated note");

        load_note(&self.conn, id)?.ok_or_else(|| StoreError::NoteNotFound { id: id.to_string() })
    }

    fn validate_parent(
        &self,
        id: &NoteId,
        candidate: Option<&NoteId>,
    ) -> StoreResult<Option<NoteId>> {
        require_note(&self.conn, id)?;
        validate_parent(id, candidate, &ConnLookup(&self.conn))
    }

    fn can_delete(&self, id: &NoteId) -> StoreResult<bool> {
        require_note(&self.conn, id)?;
        Ok(child_count(&self.conn, id)? == 0)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(note = %id))]
    fn delete_note(&mut self, id: &NoteId) -> StoreResult<()> {
        let tx = self.transaction()?;
        let conn = tx.conn();

        require_note(conn, id)?;
        let children = child_count(conn, id)?;
        if children > 0 {
            tracing::warn!(note = %id, children, "refused to delete note with children");
            return Err(StoreError::HasChildren { children });
        }

        let links = unlink_editions(conn, id)?;
        conn.execute("DELETE FROM notes WHERE id = ?1", [id.to_string()])?;

        tx.commit()?;
        tracing::info!(note = %id, edition_links = links, "deleted note");
        Ok(())
    }

    fn children(&self, id: &NoteId) -> StoreResult<Vec<Note>> {
        let ids = query_ids(
            &self.conn,
            "SELECT id FROM notes WHERE parent_id = ?1 ORDER BY idx",
            [id.to_string()],
        )?;
        load_notes(&self.conn, &ids)
    }

    fn top_level(&self, request: PageRequest) -> StoreResult<Page<Note>> {
        let total: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM notes WHERE parent_id IS NULL",
            [],
            |row| row.get(0),
        )?;
        let total = total as usize;

        let Some((limit, offset)) = request.sql_bounds() else {
            return Ok(Page::new(Vec::new(), request, total));
        };

        let ids = query_ids(
            &self.conn,
            "SELECT id FROM notes WHERE parent_id IS NULL
             ORDER BY created_at, rowid
             LIMIT ?1 OFFSET ?2",
            [limit, offset],
        )?;

        let notes = load_notes(&self.conn, &ids)?;
        Ok(Page::new(notes, request, total))
    }

    fn find_notes(&self, filter: &NoteFilter) -> StoreResult<Vec<Note>> {
        let (clause, params) = filter.to_sql();
        let sql = format!("SELECT n.id FROM notes n WHERE {} ORDER BY n.idx", clause);
        let ids = query_ids(&self.conn, &sql, rusqlite::params_from_iter(params.iter()))?;
        load_notes(&self.conn, &ids)
    }

    fn find_by_index(&self, index: &NoteIndex) -> StoreResult<Option<Note>> {
        let ids = query_ids(
            &self.conn,
            "SELECT id FROM notes WHERE idx = ?1",
            [index.to_string()],
        )?;
        match ids.first() {
            Some(id) => load_note(&self.conn, id),
            None => Ok(None),
        }
    }

    fn find_by_id_prefix(&self, prefix: &str) -> StoreResult<Vec<Note>> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        // ULID ids are stored uppercase
        let pattern = format!("{}%", escape_like(&prefix.to_uppercase()));
        let ids = query_ids(
            &self.conn,
            "SELECT id FROM notes WHERE id LIKE ?1 ESCAPE '\\' ORDER BY id",
            [pattern],
        )?;
        load_notes(&self.conn, &ids)
    }

    fn autocomplete_notes(&self, query: &str, limit: usize) -> StoreResult<Vec<Note>> {
        let query = query.trim();
        let topic_pattern = format!("{}%", escape_like(&query.to_lowercase()));
        let index_pattern = format!("{}%", escape_like(query));
        let ids = query_ids(
            &self.conn,
            "SELECT id FROM notes
             WHERE casefold(topic) LIKE ?1 ESCAPE '\\' OR idx LIKE ?2 ESCAPE '\\'
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?3",
            rusqlite::params![topic_pattern, index_pattern, limit as i64],
        )?;
        load_notes(&self.conn, &ids)
    }

    fn autocomplete_keywords(&self, query: &str, limit: usize) -> StoreResult<Vec<Keyword>> {
        let pattern = format!("{}%", escape_like(&query.trim().to_lowercase()));
        let mut stmt = self.conn.prepare(
            "SELECT word FROM keywords
             WHERE casefold(word) LIKE ?1 ESCAPE '\\'
             ORDER BY word
             LIMIT ?2",
        )?;
        let words = stmt
            .query_map(rusqlite::params![pattern, limit as i64], |row| {
                row.get::<_, String>(0)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        words
            .iter()
            .map(|w| {
                Keyword::new(w)
                    .map_err(|e| StoreError::InvalidData(format!("invalid keyword: {}", e)))
            })
            .collect()
    }

    fn add_edition(&mut self, title: &str) -> StoreResult<BookEdition> {
        let edition = insert_edition(&self.conn, title)?;
        tracing::info!(edition = %edition.id, "added book edition");
        Ok(edition)
    }

    fn get_edition(&self, id: EditionId) -> StoreResult<Option<BookEdition>> {
        fetch_edition(&self.conn, id)
    }

    fn list_editions(&self) -> StoreResult<Vec<BookEdition>> {
        all_editions(&self.conn)
    }

    fn notes_for_edition(&self, id: EditionId) -> StoreResult<Vec<EditionNote>> {
        notes_linked_to(&self.conn, id)
    }
}

/// A preset index must sit exactly one level below the parent (or be a root).
fn check_preset_index(preset: &NoteIndex, parent: Option<&NoteIndex>) -> StoreResult<()> {
    let fits = match parent {
        Some(parent) => preset.parent().as_ref() == Some(parent),
        None => preset.is_root(),
    };
    if fits {
        Ok(())
    } else {
        Err(StoreError::IndexMismatch {
            index: preset.to_string(),
            expected: match parent {
                Some(parent) => format!("parent {}", parent),
                None => "the root level".to_string(),
            },
        })
    }
}

fn duplicate_index_or(err: rusqlite::Error, index: &NoteIndex) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(code, _)
            if code.code == ErrorCode::ConstraintViolation
                && code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            StoreError::DuplicateIndex {
                index: index.to_string(),
            }
        }
        _ => StoreError::Database(err),
    }
}

fn write_keywords(conn: &Connection, note: &NoteId, keywords: &[Keyword]) -> StoreResult<()> {
    for keyword in keywords {
        conn.execute(
            "INSERT OR IGNORE INTO keywords (word) VALUES (?1)",
            [keyword.as_str()],
        )?;
        conn.execute(
            "INSERT OR IGNORE INTO note_keywords (note_id, keyword_id)
             SELECT ?1, id FROM keywords WHERE word = ?2",
            [note.to_string().as_str(), keyword.as_str()],
        )?;
    }
    Ok(())
}

/// Stores each relation once as an ordered pair; self-links are dropped.
fn write_relations(conn: &Connection, note: &NoteId, related: &[NoteId]) -> StoreResult<()> {
    for other in related.iter().filter(|other| *other != note) {
        require_note(conn, other)?;
        let (a, b) = if note < other {
            (note, other)
        } else {
            (other, note)
        };
        conn.execute(
            "INSERT OR IGNORE INTO note_relations (note_a, note_b) VALUES (?1, ?2)",
            [a.to_string(), b.to_string()],
        )?;
    }
    Ok(())
}
