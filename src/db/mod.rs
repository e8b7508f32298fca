//! Persistence module split across logical submodules.

mod audit;
mod books;
mod connection;
mod lock;
mod publishers;

pub(crate) use audit::append_audit_entry;
pub(crate) use books::delete_book_row;

pub use audit::fetch_audit_trail;
pub use books::{book_timestamps, fetch_books, insert_book, load_book, update_book};
pub use connection::{ensure_schema, open};
pub use lock::{lock_state, BookLock, LockState};
pub use publishers::{create_publisher, fetch_publishers, load_publisher};
