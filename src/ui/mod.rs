//! Ratatui front-end: a book list with a detail pane, popup forms for books
//! and publishers, and a per-book audit trail screen. All writes go through
//! `crate::catalog`, so the UI never touches SQL directly.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
