//! Row decoding and shared queries over a plain connection.
//!
//! These take `&Connection` so they work both inside a [`super::Transaction`]
//! and in autocommit reads.

use crate::domain::{EditionId, EditionLink, Keyword, Note, NoteId, NoteIndex, Topic};
use crate::hierarchy::ParentLookup;
use crate::store::{StoreError, StoreResult};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Params};

/// Fixed-width RFC 3339 so stored timestamps sort as text.
pub(super) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(value: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidData(format!("invalid timestamp '{}': {}", value, e)))
}

fn parse_note_id(value: &str) -> StoreResult<NoteId> {
    value
        .parse()
        .map_err(|e| StoreError::InvalidData(format!("invalid note id in database: {}", e)))
}

/// Parses a stored index; a failure means the index column was written by
/// something other than the store.
pub(super) fn parse_index(id: &str, value: &str) -> StoreResult<NoteIndex> {
    value.parse().map_err(|_| StoreError::CorruptIndex {
        id: id.to_string(),
        value: value.to_string(),
    })
}

pub(super) fn note_exists(conn: &Connection, id: &NoteId) -> StoreResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM notes WHERE id = ?1", [id.to_string()], |_| {
            Ok(())
        })
        .optional()?;
    Ok(found.is_some())
}

pub(super) fn require_note(conn: &Connection, id: &NoteId) -> StoreResult<()> {
    if note_exists(conn, id)? {
        Ok(())
    } else {
        Err(StoreError::NoteNotFound { id: id.to_string() })
    }
}

pub(super) fn index_of(conn: &Connection, id: &NoteId) -> StoreResult<NoteIndex> {
    let value: Option<String> = conn
        .query_row("SELECT idx FROM notes WHERE id = ?1", [id.to_string()], |row| {
            row.get(0)
        })
        .optional()?;
    match value {
        Some(value) => parse_index(&id.to_string(), &value),
        None => Err(StoreError::NoteNotFound { id: id.to_string() }),
    }
}

/// Indices of the notes sharing `parent` (root notes when `None`).
pub(super) fn sibling_indices(
    conn: &Connection,
    parent: Option<&NoteId>,
) -> StoreResult<Vec<NoteIndex>> {
    let rows: Vec<(String, String)> = match parent {
        Some(parent) => collect_pairs(
            conn,
            "SELECT id, idx FROM notes WHERE parent_id = ?1",
            [parent.to_string()],
        )?,
        None => collect_pairs(conn, "SELECT id, idx FROM notes WHERE parent_id IS NULL", [])?,
    };

    rows.iter()
        .map(|(id, idx)| parse_index(id, idx))
        .collect()
}

fn collect_pairs<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> StoreResult<Vec<(String, String)>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub(super) fn child_count(conn: &Connection, id: &NoteId) -> StoreResult<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM notes WHERE parent_id = ?1",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

/// Runs a query whose first column is a note id and decodes the ids.
pub(super) fn query_ids<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> StoreResult<Vec<NoteId>> {
    let mut stmt = conn.prepare(sql)?;
    let raw = stmt
        .query_map(params, |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    raw.iter().map(|s| parse_note_id(s)).collect()
}

/// Loads full notes for `ids`, keeping their order.
pub(super) fn load_notes(conn: &Connection, ids: &[NoteId]) -> StoreResult<Vec<Note>> {
    let mut notes = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(note) = load_note(conn, id)? {
            notes.push(note);
        }
    }
    Ok(notes)
}

/// Loads a note with its keywords, edition links and related notes.
pub(super) fn load_note(conn: &Connection, id: &NoteId) -> StoreResult<Option<Note>> {
    let id_str = id.to_string();

    let row = conn
        .query_row(
            "SELECT idx, parent_id, topic, text, created_at, updated_at
             FROM notes WHERE id = ?1",
            [&id_str],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            },
        )
        .optional()?;

    let Some((idx, parent, topic, text, created_at, updated_at)) = row else {
        return Ok(None);
    };

    let index = parse_index(&id_str, &idx)?;
    let parent = parent.as_deref().map(parse_note_id).transpose()?;
    let topic = Topic::new(&topic)
        .map_err(|e| StoreError::InvalidData(format!("invalid topic on note {}: {}", id, e)))?;
    let created_at = parse_timestamp(&created_at)?;
    let updated_at = parse_timestamp(&updated_at)?;

    let keywords = {
        let mut stmt = conn.prepare(
            "SELECT k.word FROM keywords k
             JOIN note_keywords nk ON nk.keyword_id = k.id
             WHERE nk.note_id = ?1
             ORDER BY k.word",
        )?;
        let words = stmt
            .query_map([&id_str], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        words
            .iter()
            .map(|w| {
                Keyword::new(w)
                    .map_err(|e| StoreError::InvalidData(format!("invalid keyword: {}", e)))
            })
            .collect::<StoreResult<Vec<_>>>()?
    };

    let editions = {
        let mut stmt = conn.prepare(
            "SELECT edition_id, additional_info FROM note_editions
             WHERE note_id = ?1
             ORDER BY edition_id",
        )?;
        let links = stmt
            .query_map([&id_str], |row| {
                Ok(EditionLink::new(
                    EditionId::new(row.get(0)?),
                    row.get::<_, String>(1)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        links
    };

    let related = query_ids(
        conn,
        "SELECT note_b FROM note_relations WHERE note_a = ?1
         UNION
         SELECT note_a FROM note_relations WHERE note_b = ?1
         ORDER BY 1",
        [&id_str],
    )?;

    let note = Note::builder(id.clone(), index, topic, created_at, updated_at)
        .parent(parent)
        .text(text)
        .keywords(keywords)
        .editions(editions)
        .related(related)
        .build();

    Ok(Some(note))
}

/// Parent lookups against the notes table, for the cycle guard.
pub(super) struct ConnLookup<'a>(pub(super) &'a Connection);

impl ParentLookup for ConnLookup<'_> {
    type Error = StoreError;

    fn parent_of(&self, id: &NoteId) -> StoreResult<Option<NoteId>> {
        let row: Option<Option<String>> = self
            .0
            .query_row(
                "SELECT parent_id FROM notes WHERE id = ?1",
                [id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        match row {
            Some(parent) => parent.as_deref().map(parse_note_id).transpose(),
            None => Err(StoreError::NoteNotFound { id: id.to_string() }),
        }
    }
}
