//! Book edition catalog and note/edition link queries.

use super::rows::{load_notes, query_ids};
use crate::domain::{BookEdition, EditionId, EditionLink, NoteId};
use crate::store::{EditionNote, StoreError, StoreResult};
use rusqlite::{Connection, OptionalExtension};

pub(super) fn insert_edition(conn: &Connection, title: &str) -> StoreResult<BookEdition> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::InvalidData(
            "edition title cannot be empty".to_string(),
        ));
    }

    conn.execute("INSERT INTO book_editions (title) VALUES (?1)", [title])?;
    Ok(BookEdition {
        id: EditionId::new(conn.last_insert_rowid()),
        title: title.to_string(),
    })
}

pub(super) fn fetch_edition(conn: &Connection, id: EditionId) -> StoreResult<Option<BookEdition>> {
    let title: Option<String> = conn
        .query_row(
            "SELECT title FROM book_editions WHERE id = ?1",
            [id.get()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(title.map(|title| BookEdition { id, title }))
}

pub(super) fn all_editions(conn: &Connection) -> StoreResult<Vec<BookEdition>> {
    let mut stmt = conn.prepare("SELECT id, title FROM book_editions ORDER BY title, id")?;
    let editions = stmt
        .query_map([], |row| {
            Ok(BookEdition {
                id: EditionId::new(row.get(0)?),
                title: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(editions)
}

/// Writes a note's edition links; a repeated edition keeps the last annotation.
pub(super) fn link_editions(
    conn: &Connection,
    note: &NoteId,
    links: &[EditionLink],
) -> StoreResult<()> {
    for link in links {
        if fetch_edition(conn, link.edition)?.is_none() {
            return Err(StoreError::EditionNotFound { id: link.edition });
        }
        conn.execute(
            "INSERT INTO note_editions (note_id, edition_id, additional_info)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(note_id, edition_id) DO UPDATE SET
                 additional_info = excluded.additional_info",
            rusqlite::params![note.to_string(), link.edition.get(), link.additional_info],
        )?;
    }
    Ok(())
}

pub(super) fn unlink_editions(conn: &Connection, note: &NoteId) -> StoreResult<usize> {
    Ok(conn.execute(
        "DELETE FROM note_editions WHERE note_id = ?1",
        [note.to_string()],
    )?)
}

pub(super) fn notes_linked_to(conn: &Connection, id: EditionId) -> StoreResult<Vec<EditionNote>> {
    if fetch_edition(conn, id)?.is_none() {
        return Err(StoreError::EditionNotFound { id });
    }

    let ids = query_ids(
        conn,
        "SELECT n.id FROM notes n
         JOIN note_editions ne ON ne.note_id = n.id
         WHERE ne.edition_id = ?1
         ORDER BY n.idx",
        [id.get()],
    )?;

    let notes = load_notes(conn, &ids)?;
    Ok(notes
        .into_iter()
        .map(|note| {
            let additional_info = note
                .editions()
                .iter()
                .find(|link| link.edition == id)
                .map(|link| link.additional_info.clone())
                .unwrap_or_default();
            EditionNote {
                note,
                additional_info,
            }
        })
        .collect())
}
