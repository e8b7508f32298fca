//! Records that mirror the `Books`, `Publishers`, and `book_audit_trail`
//! tables. They stay plain data holders; validation lives in
//! `validation`, diffing in `changes`, and persistence in `db`.

use std::fmt;

use chrono::NaiveDateTime;

/// Database id of the well-known "Unknown" publisher. Books that never had a
/// publisher assigned point here.
pub const DEFAULT_PUBLISHER_ID: i64 = 1;

/// Display name seeded for [`DEFAULT_PUBLISHER_ID`].
pub const DEFAULT_PUBLISHER_NAME: &str = "Unknown";

/// A row in `Publishers`. Books reference publishers by id; the name is
/// what the UI and the audit trail show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publisher {
    /// Primary key. `1` is always the seeded "Unknown" row.
    pub id: i64,
    /// Unique display name.
    pub name: String,
}

impl Publisher {
    /// The seeded placeholder row.
    pub fn unknown() -> Self {
        Self {
            id: DEFAULT_PUBLISHER_ID,
            name: DEFAULT_PUBLISHER_NAME.to_string(),
        }
    }

    /// Whether this is the placeholder rather than an explicit assignment.
    pub fn is_unknown(&self) -> bool {
        self.id == DEFAULT_PUBLISHER_ID
    }
}

impl fmt::Display for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The editable part of a book. This is what a form submits and what the
/// diff engine compares against the stored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    /// Free text; empty when the book has no summary.
    pub summary: String,
    /// Calendar year. `0` is accepted and means the year is not known.
    pub year_published: i32,
    /// Stored as typed, hyphens included; only the length is checked.
    pub isbn: String,
    /// Foreign key into `Publishers`. Defaults to the "Unknown" publisher.
    pub publisher_id: i64,
}

impl Default for BookFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            summary: String::new(),
            year_published: 0,
            isbn: String::new(),
            publisher_id: DEFAULT_PUBLISHER_ID,
        }
    }
}

/// In-memory representation of a row in `Books`.
///
/// `id == 0` marks a book that has not been persisted yet. `date_added` is
/// write-once: it can only be established while it is still empty, so a
/// caller cannot overwrite the value the store assigned on first insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Primary key, or `0` before the first save.
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub year_published: i32,
    pub isbn: String,
    /// The full publisher row, joined in when the book is loaded, so lists
    /// and audit messages can show the name without another query.
    pub publisher: Publisher,
    /// When the book entered the catalog. Assigned by the store on insert
    /// and never rewritten; `None` only for unsaved books.
    date_added: Option<NaiveDateTime>,
    /// Stamped by the store on every insert and update.
    pub last_modified: Option<NaiveDateTime>,
}

impl Default for Book {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            summary: String::new(),
            year_published: 0,
            isbn: String::new(),
            publisher: Publisher::unknown(),
            date_added: None,
            last_modified: None,
        }
    }
}

impl Book {
    /// Unsaved book carrying the given fields. The publisher name is filled
    /// in by the store when the book is saved.
    pub fn new(fields: BookFields) -> Self {
        let mut book = Self::default();
        book.apply(&fields, publisher_placeholder(fields.publisher_id));
        book
    }

    /// Whether the book has never been saved.
    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    pub fn date_added(&self) -> Option<NaiveDateTime> {
        self.date_added
    }

    /// Record the date the book entered the catalog. Returns `false` and
    /// leaves the record untouched when a date was already established.
    pub fn establish_date_added(&mut self, date_added: NaiveDateTime) -> bool {
        if self.date_added.is_some() {
            return false;
        }
        self.date_added = Some(date_added);
        true
    }

    /// Snapshot of the editable fields.
    pub fn fields(&self) -> BookFields {
        BookFields {
            title: self.title.clone(),
            summary: self.summary.clone(),
            year_published: self.year_published,
            isbn: self.isbn.clone(),
            publisher_id: self.publisher.id,
        }
    }

    /// Overwrite every editable field, whether or not it changed.
    pub fn apply(&mut self, fields: &BookFields, publisher: Publisher) {
        self.title = fields.title.clone();
        self.summary = fields.summary.clone();
        self.year_published = fields.year_published;
        self.isbn = fields.isbn.clone();
        self.publisher = publisher;
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book Title: {}, Year Published: {}",
            self.title, self.year_published
        )
    }
}

fn publisher_placeholder(id: i64) -> Publisher {
    if id == DEFAULT_PUBLISHER_ID {
        Publisher::unknown()
    } else {
        Publisher {
            id,
            name: String::new(),
        }
    }
}

/// One append-only line of a book's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// Insertion order; breaks ties between entries with the same timestamp.
    pub id: i64,
    /// The book this entry describes. Entries go away only with their book.
    pub book_id: i64,
    /// Store-assigned time the change was committed.
    pub timestamp: NaiveDateTime,
    /// Human-readable description such as `Title changed from A to B`.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn date_added_is_write_once() {
        let mut book = Book::default();
        assert!(book.establish_date_added(at(9)));
        assert!(!book.establish_date_added(at(17)));
        assert_eq!(book.date_added(), Some(at(9)));
    }

    #[test]
    fn new_books_start_unsaved_with_the_unknown_publisher() {
        let book = Book::new(BookFields {
            title: "Dune".into(),
            ..BookFields::default()
        });
        assert!(book.is_new());
        assert!(book.publisher.is_unknown());
        assert!(book.date_added().is_none());
        assert!(book.last_modified.is_none());
    }

    #[test]
    fn display_matches_list_format() {
        let book = Book::new(BookFields {
            title: "Dune".into(),
            year_published: 1965,
            ..BookFields::default()
        });
        assert_eq!(book.to_string(), "Book Title: Dune, Year Published: 1965");
    }
}
