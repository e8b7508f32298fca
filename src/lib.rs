//! Core library surface for the book catalog.
//!
//! The catalog keeps `Books`, `Publishers`, and an append-only
//! `book_audit_trail` in SQLite. Edits to a stored book run under a write
//! lock: the proposed values are diffed against the stored row, every
//! changed field gets an audit line, and the update plus its audit lines
//! commit together or roll back together.
pub mod catalog;
pub mod changes;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;
pub mod validation;

/// The operations the presentation layer calls.
pub use catalog::{delete_book, fetch_audit_trail, save, validate};

/// Startup helpers used by `main.rs`.
pub use config::Config;
pub use db::{fetch_books, fetch_publishers, open};

pub use error::{CatalogError, Result, ValidationError};
pub use models::{AuditEntry, Book, BookFields, Publisher};
pub use validation::{Clock, SystemClock};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
