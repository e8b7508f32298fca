//! Field rules checked before any write. Pure: no I/O beyond asking the
//! clock for the current year.

use chrono::{Datelike, Local};

use crate::error::ValidationError;
use crate::models::Book;

pub const TITLE_MAX_CHARS: usize = 255;
pub const SUMMARY_MAX_CHARS: usize = 65_536;
pub const ISBN_MAX_CHARS: usize = 13;

/// Source of the current calendar year. The year is read at validation time,
/// so a book dated "next year" becomes valid on New Year's Day.
pub trait Clock {
    fn current_year(&self) -> i32;
}

/// Local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        Local::now().year()
    }
}

/// Clock pinned to a single year. Used by tests and batch tools that need
/// reproducible results.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

/// Check every field rule in a fixed order and report the first failure:
/// title, summary, year, ISBN, then date-added presence for stored books.
/// Lengths are counted in characters, not bytes.
pub fn validate(book: &Book, clock: &impl Clock) -> Result<(), ValidationError> {
    let title_len = book.title.chars().count();
    if !(1..=TITLE_MAX_CHARS).contains(&title_len) {
        return Err(ValidationError::InvalidTitle { len: title_len });
    }

    let summary_len = book.summary.chars().count();
    if summary_len > SUMMARY_MAX_CHARS {
        return Err(ValidationError::InvalidSummary { len: summary_len });
    }

    let current_year = clock.current_year();
    if book.year_published < 0 || book.year_published > current_year {
        return Err(ValidationError::InvalidYear {
            year: book.year_published,
            current_year,
        });
    }

    let isbn_len = book.isbn.chars().count();
    if isbn_len > ISBN_MAX_CHARS {
        return Err(ValidationError::InvalidIsbn { len: isbn_len });
    }

    if !book.is_new() && book.date_added().is_none() {
        return Err(ValidationError::DateNotEstablished { id: book.id });
    }

    Ok(())
}
