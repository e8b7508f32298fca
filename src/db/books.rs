use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::models::{Book, Publisher};

use super::connection::NOW;

const SELECT_BOOK: &str = "SELECT b.id, b.title, b.summary, b.year_published, b.isbn,
        b.date_added, b.last_modified, p.id, p.name
     FROM Books b
     INNER JOIN Publishers p ON p.id = b.publisher_id";

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    let mut book = Book::default();
    book.id = row.get(0)?;
    book.title = row.get(1)?;
    book.summary = row.get(2)?;
    book.year_published = row.get(3)?;
    book.isbn = row.get(4)?;
    book.establish_date_added(row.get(5)?);
    book.last_modified = Some(row.get(6)?);
    book.publisher = Publisher {
        id: row.get(7)?,
        name: row.get(8)?,
    };
    Ok(book)
}

/// Every book with its publisher, ordered case-insensitively by title.
pub fn fetch_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_BOOK} ORDER BY b.title COLLATE NOCASE, b.id"
    ))?;

    let books = stmt
        .query_map([], book_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(books)
}

/// A single book with its publisher, or `None` when no row has this id.
/// Inside a [`BookLock`](super::BookLock) this is the locked snapshot the
/// diff runs against.
pub fn load_book(conn: &Connection, id: i64) -> Result<Option<Book>> {
    let book = conn
        .query_row(
            &format!("{SELECT_BOOK} WHERE b.id = ?1"),
            [id],
            book_from_row,
        )
        .optional()?;
    Ok(book)
}

/// Write a new row and hydrate `book` from what was stored: the generated
/// id plus both timestamps, which are read back rather than taken from the
/// caller. Returns the new id.
pub fn insert_book(conn: &Connection, book: &mut Book) -> Result<i64> {
    conn.execute(
        "INSERT INTO Books (title, summary, year_published, publisher_id, isbn)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            book.title,
            book.summary,
            book.year_published,
            book.publisher.id,
            book.isbn
        ],
    )?;

    let id = conn.last_insert_rowid();
    let (date_added, last_modified) = book_timestamps(conn, id)?;

    book.id = id;
    book.establish_date_added(date_added);
    book.last_modified = Some(last_modified);

    debug!(book_id = id, "inserted book");
    Ok(id)
}

/// Rewrite the editable columns of an existing row and stamp
/// `last_modified`. `date_added` is never part of the statement.
pub fn update_book(conn: &Connection, book: &mut Book) -> Result<()> {
    let updated = conn.execute(
        &format!(
            "UPDATE Books
             SET title = ?1, summary = ?2, year_published = ?3, isbn = ?4,
                 publisher_id = ?5, last_modified = {NOW}
             WHERE id = ?6"
        ),
        params![
            book.title,
            book.summary,
            book.year_published,
            book.isbn,
            book.publisher.id,
            book.id
        ],
    )?;

    if updated == 0 {
        return Err(CatalogError::BookNotFound(book.id));
    }

    let (_, last_modified) = book_timestamps(conn, book.id)?;
    book.last_modified = Some(last_modified);

    debug!(book_id = book.id, "updated book");
    Ok(())
}

/// `(date_added, last_modified)` as stored.
pub fn book_timestamps(conn: &Connection, id: i64) -> Result<(NaiveDateTime, NaiveDateTime)> {
    conn.query_row(
        "SELECT date_added, last_modified FROM Books WHERE id = ?1",
        [id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .optional()?
    .ok_or(CatalogError::BookNotFound(id))
}

/// Remove a book row. The schema cascades to `book_audit_trail`.
pub(crate) fn delete_book_row(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn.execute("DELETE FROM Books WHERE id = ?1", [id])?;

    if deleted == 0 {
        Err(CatalogError::BookNotFound(id))
    } else {
        Ok(())
    }
}
