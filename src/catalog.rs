//! The edit flow exposed to the presentation layer: validate a candidate,
//! save it (insert, or lock → diff → validate → persist → commit), delete
//! under lock, and read back the audit trail.

use rusqlite::{Connection, TransactionBehavior};
use tracing::{info, warn};

use crate::changes::{self, FieldChange};
use crate::db::{
    append_audit_entry, delete_book_row, insert_book, load_book, load_publisher, update_book,
    BookLock,
};
use crate::error::{CatalogError, Result, ValidationError};
use crate::models::{Book, BookFields, Publisher};
use crate::validation::{self, Clock};

pub use crate::db::fetch_audit_trail;

/// Check a candidate book without touching storage.
pub fn validate(book: &Book, clock: &impl Clock) -> std::result::Result<(), ValidationError> {
    validation::validate(book, clock)
}

/// Persist `proposed` as the new state of `book` and return the stored
/// result.
///
/// New books (`id == 0`) are inserted and come back with their id and both
/// timestamps. Existing books are locked, diffed against the stored row,
/// re-validated, updated, and get one audit entry per changed field; the
/// update and its entries commit together or not at all. `date_added` is
/// always the stored value, whatever `book` carries.
pub fn save(
    conn: &mut Connection,
    clock: &impl Clock,
    book: &Book,
    proposed: &BookFields,
) -> Result<Book> {
    let mut candidate = book.clone();
    candidate.apply(
        proposed,
        Publisher {
            id: proposed.publisher_id,
            name: String::new(),
        },
    );
    validation::validate(&candidate, clock)?;

    if book.is_new() {
        insert_new(conn, proposed)
    } else {
        update_existing(conn, clock, book.id, proposed)
    }
}

fn insert_new(conn: &mut Connection, proposed: &BookFields) -> Result<Book> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|err| CatalogError::from_lock_attempt(err, 0))?;

    let publisher = load_publisher(&tx, proposed.publisher_id)?;
    let mut book = Book::default();
    book.apply(proposed, publisher);
    let id = insert_book(&tx, &mut book)?;
    tx.commit()?;

    info!(book_id = id, title = %book.title, "added book");
    Ok(book)
}

fn update_existing(
    conn: &mut Connection,
    clock: &impl Clock,
    book_id: i64,
    proposed: &BookFields,
) -> Result<Book> {
    let lock = BookLock::acquire(conn, book_id)?;

    match apply_update(&lock, clock, proposed) {
        Ok((book, changes)) => {
            lock.commit()?;
            info!(book_id, changes = changes.len(), "saved book");
            Ok(book)
        }
        Err(err) => {
            warn!(book_id, error = %err, "save failed, rolling back");
            if let Err(rollback_err) = lock.rollback() {
                warn!(book_id, error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}

/// Everything that happens while the lock is held. Any error leaves the
/// caller responsible for rolling back.
fn apply_update(
    lock: &BookLock<'_>,
    clock: &impl Clock,
    proposed: &BookFields,
) -> Result<(Book, Vec<FieldChange>)> {
    let book_id = lock.book_id();
    let stored = load_book(lock, book_id)?.ok_or(CatalogError::BookNotFound(book_id))?;

    let publisher = if proposed.publisher_id == stored.publisher.id {
        stored.publisher.clone()
    } else {
        load_publisher(lock, proposed.publisher_id)?
    };

    let changes = changes::diff(&stored, proposed, &publisher);

    let mut updated = stored;
    updated.apply(proposed, publisher);
    validation::validate(&updated, clock)?;

    update_book(lock, &mut updated)?;
    for change in &changes {
        append_audit_entry(lock, book_id, &change.audit_message())?;
    }

    Ok((updated, changes))
}

/// Delete a book and its audit trail under the book's lock.
pub fn delete_book(conn: &mut Connection, book_id: i64) -> Result<()> {
    let lock = BookLock::acquire(conn, book_id)?;
    delete_book_row(&lock, lock.book_id())?;
    lock.commit()?;
    info!(book_id, "deleted book");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::{create_publisher, fetch_books, lock_state, open, LockState};
    use crate::validation::FixedClock;
    use chrono::NaiveDate;

    const CLOCK: FixedClock = FixedClock(2024);

    fn dune_fields() -> BookFields {
        BookFields {
            title: "Dune".into(),
            summary: "Spice.".into(),
            year_published: 1965,
            isbn: "0441013597".into(),
            ..BookFields::default()
        }
    }

    fn setup() -> (Connection, Book) {
        let mut conn = open(&Config::in_memory()).unwrap();
        let book = save(&mut conn, &CLOCK, &Book::default(), &dune_fields()).unwrap();
        (conn, book)
    }

    fn trail(conn: &Connection, id: i64) -> Vec<String> {
        fetch_audit_trail(conn, id)
            .unwrap()
            .into_iter()
            .map(|entry| entry.message)
            .collect()
    }

    #[test]
    fn insert_assigns_id_and_timestamps() {
        let (conn, book) = setup();
        assert!(book.id > 0);
        assert!(book.date_added().is_some());
        assert_eq!(book.date_added(), book.last_modified);
        assert_eq!(load_book(&conn, book.id).unwrap().unwrap(), book);
        assert!(trail(&conn, book.id).is_empty());
    }

    #[test]
    fn title_change_writes_one_audit_entry() {
        let (mut conn, book) = setup();
        let proposed = BookFields {
            title: "Dune Messiah".into(),
            ..book.fields()
        };

        let saved = save(&mut conn, &CLOCK, &book, &proposed).unwrap();

        assert_eq!(saved.title, "Dune Messiah");
        assert_eq!(
            trail(&conn, book.id),
            vec!["Title changed from Dune to Dune Messiah"]
        );
    }

    #[test]
    fn unchanged_save_only_touches_last_modified() {
        let (mut conn, book) = setup();

        let saved = save(&mut conn, &CLOCK, &book, &book.fields()).unwrap();

        assert!(trail(&conn, book.id).is_empty());
        assert_eq!(saved.fields(), book.fields());
        assert_eq!(saved.date_added(), book.date_added());
        assert!(saved.last_modified >= book.last_modified);
    }

    #[test]
    fn assigning_a_first_publisher() {
        let (mut conn, book) = setup();
        let ace = create_publisher(&conn, "Ace Books").unwrap();
        let proposed = BookFields {
            publisher_id: ace.id,
            ..book.fields()
        };

        let saved = save(&mut conn, &CLOCK, &book, &proposed).unwrap();

        assert_eq!(saved.publisher, ace);
        assert_eq!(trail(&conn, book.id), vec!["Publisher Ace Books Added"]);
    }

    #[test]
    fn date_added_never_moves() {
        let (mut conn, book) = setup();
        let original = book.date_added();

        let mut tampered = book.clone();
        let later = NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(!tampered.establish_date_added(later));

        let first = save(&mut conn, &CLOCK, &tampered, &tampered.fields()).unwrap();
        let second = save(
            &mut conn,
            &CLOCK,
            &first,
            &BookFields {
                year_published: 1966,
                ..first.fields()
            },
        )
        .unwrap();

        assert_eq!(first.date_added(), original);
        assert_eq!(second.date_added(), original);
    }

    #[test]
    fn invalid_update_changes_nothing() {
        let (mut conn, book) = setup();
        let proposed = BookFields {
            title: "Dune Messiah".into(),
            year_published: 2999,
            ..book.fields()
        };

        let err = save(&mut conn, &CLOCK, &book, &proposed).unwrap_err();

        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::InvalidYear { year: 2999, .. })
        ));
        assert_eq!(load_book(&conn, book.id).unwrap().unwrap(), book);
        assert!(trail(&conn, book.id).is_empty());
        assert_eq!(lock_state(&conn), LockState::Unlocked);
    }

    #[test]
    fn update_without_established_date_is_rejected() {
        let (mut conn, book) = setup();
        let mut detached = Book::new(book.fields());
        detached.id = book.id;

        let err = save(&mut conn, &CLOCK, &detached, &book.fields()).unwrap_err();

        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::DateNotEstablished { .. })
        ));
    }

    #[test]
    fn unknown_publisher_rolls_back_the_whole_update() {
        let (mut conn, book) = setup();
        let proposed = BookFields {
            title: "Dune Messiah".into(),
            publisher_id: 404,
            ..book.fields()
        };

        let err = save(&mut conn, &CLOCK, &book, &proposed).unwrap_err();

        assert!(matches!(err, CatalogError::PublisherNotFound(404)));
        assert_eq!(load_book(&conn, book.id).unwrap().unwrap().title, "Dune");
        assert!(trail(&conn, book.id).is_empty());
        assert_eq!(lock_state(&conn), LockState::Unlocked);
    }

    #[test]
    fn saving_a_deleted_book_reports_it_missing() {
        let (mut conn, book) = setup();
        delete_book(&mut conn, book.id).unwrap();

        let err = save(&mut conn, &CLOCK, &book, &book.fields()).unwrap_err();
        assert!(matches!(err, CatalogError::BookNotFound(id) if id == book.id));
    }

    #[test]
    fn delete_removes_book_and_history() {
        let (mut conn, book) = setup();
        save(
            &mut conn,
            &CLOCK,
            &book,
            &BookFields {
                isbn: "9780441013593".into(),
                ..book.fields()
            },
        )
        .unwrap();

        delete_book(&mut conn, book.id).unwrap();

        assert!(fetch_books(&conn).unwrap().is_empty());
        assert!(trail(&conn, book.id).is_empty());
        assert!(matches!(
            delete_book(&mut conn, book.id),
            Err(CatalogError::BookNotFound(_))
        ));
    }
}
