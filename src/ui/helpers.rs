use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::models::Book;

/// Base URL for looking a book up by ISBN.
const ISBN_LOOKUP_URL: &str = "https://openlibrary.org/isbn/";

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// One row of the book list: title, year, and publisher.
pub(crate) fn book_list_line(book: &Book) -> String {
    let year = if book.year_published == 0 {
        "----".to_string()
    } else {
        format!("{:>4}", book.year_published)
    };
    format!("{}  {}  ({})", year, book.title, book.publisher.name)
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Lookup URL for a book, or `None` when it has no ISBN.
pub(crate) fn isbn_lookup_url(isbn: &str) -> Option<String> {
    let isbn: String = isbn.chars().filter(|ch| ch.is_ascii_alphanumeric()).collect();
    if isbn.is_empty() {
        None
    } else {
        Some(format!("{ISBN_LOOKUP_URL}{isbn}"))
    }
}
