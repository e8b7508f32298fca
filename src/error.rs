//! Error taxonomy for the catalog core. Validation problems are reported
//! before storage is touched; everything that goes wrong after a lock is
//! taken is a `CatalogError` and has already been rolled back by the time
//! the caller sees it.

use rusqlite::ErrorCode;

/// Result alias used across the persistence and service layers.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Field-level rejection of a candidate book.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title must be between 1 and 255 characters (got {len}).")]
    InvalidTitle { len: usize },

    #[error("Summary must be at most 65536 characters (got {len}).")]
    InvalidSummary { len: usize },

    #[error("Year published must be between 0 and {current_year} (got {year}).")]
    InvalidYear { year: i32, current_year: i32 },

    #[error("ISBN must be at most 13 characters (got {len}).")]
    InvalidIsbn { len: usize },

    #[error("Date added was never established for book {id}.")]
    DateNotEstablished { id: i64 },
}

/// Everything the catalog can report to the presentation layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Connection or query failure. Any open transaction was rolled back.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Another session holds the write lock and the busy timeout elapsed.
    #[error("book {book_id} is locked by another session")]
    LockTimeout { book_id: i64 },

    #[error("Book {0} not found")]
    BookNotFound(i64),

    #[error("Publisher {0} not found")]
    PublisherNotFound(i64),

    #[error("Publisher {0} already exists.")]
    DuplicatePublisher(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Translate a failure raised while taking the write lock. SQLite reports
    /// lock contention as BUSY (or LOCKED for shared-cache peers) once the
    /// busy timeout runs out.
    pub(crate) fn from_lock_attempt(err: rusqlite::Error, book_id: i64) -> Self {
        if is_busy(&err) {
            CatalogError::LockTimeout { book_id }
        } else {
            CatalogError::Storage(err)
        }
    }

    /// True when the error is a validation rejection rather than a storage
    /// or locking failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, CatalogError::Validation(_))
    }
}

fn is_busy(err: &rusqlite::Error) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_errors_become_lock_timeouts() {
        let busy = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        );
        assert!(matches!(
            CatalogError::from_lock_attempt(busy, 4),
            CatalogError::LockTimeout { book_id: 4 }
        ));
    }

    #[test]
    fn other_errors_stay_storage_errors() {
        let err = CatalogError::from_lock_attempt(rusqlite::Error::QueryReturnedNoRows, 4);
        assert!(matches!(err, CatalogError::Storage(_)));
        assert!(!err.is_validation());
    }

    #[test]
    fn validation_messages_carry_the_offending_value() {
        let err = ValidationError::InvalidYear {
            year: 3000,
            current_year: 2026,
        };
        assert_eq!(
            err.to_string(),
            "Year published must be between 0 and 2026 (got 3000)."
        );
    }
}
