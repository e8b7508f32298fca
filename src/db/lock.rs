//! Pessimistic write lock around a single book.
//!
//! SQLite has no `SELECT ... FOR UPDATE`, so the lock is an immediate
//! transaction (the database write lock) followed by a locking read of the
//! target row. A competing session blocks for the connection's busy timeout
//! and then fails with [`CatalogError::LockTimeout`].
//!
//! [`BookLock`] is the only way to hold the lock. Dropping it without
//! `commit`/`rollback` rolls back, so every exit path releases it.

use std::ops::Deref;

use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};

/// Whether a connection currently holds an open transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    Locked,
}

/// Report the lock state from the connection's autocommit flag.
pub fn lock_state(conn: &Connection) -> LockState {
    if conn.is_autocommit() {
        LockState::Unlocked
    } else {
        LockState::Locked
    }
}

/// Held write lock on one book row. Derefs to the connection so store
/// functions run inside the locked transaction.
#[derive(Debug)]
#[must_use = "if unused, the lock is released immediately by rolling back"]
pub struct BookLock<'c> {
    tx: Transaction<'c>,
    book_id: i64,
}

impl<'c> BookLock<'c> {
    /// Start an immediate transaction and read the target row inside it.
    /// Fails with `LockTimeout` when another session keeps the lock past the
    /// busy timeout and with `BookNotFound` when the row does not exist; in
    /// both cases the connection is left unlocked.
    pub fn acquire(conn: &'c mut Connection, book_id: i64) -> Result<Self> {
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|err| {
                let err = CatalogError::from_lock_attempt(err, book_id);
                warn!(book_id, error = %err, "failed to acquire book lock");
                err
            })?;

        let found = tx
            .query_row("SELECT id FROM Books WHERE id = ?1", [book_id], |_| Ok(()))
            .optional()?;
        if found.is_none() {
            return Err(CatalogError::BookNotFound(book_id));
        }

        debug!(book_id, "acquired book lock");
        Ok(Self { tx, book_id })
    }

    pub fn book_id(&self) -> i64 {
        self.book_id
    }

    /// End the edit session, keeping (`commit == true`) or discarding the
    /// work done under the lock. The handle is consumed, so a lock can only
    /// be released once.
    pub fn release(self, commit: bool) -> Result<()> {
        if commit {
            self.commit()
        } else {
            self.rollback()
        }
    }

    /// Make every change written under the lock visible and release it. A
    /// failed commit rolls back before the error is returned.
    pub fn commit(self) -> Result<()> {
        let book_id = self.book_id;
        self.tx.commit()?;
        debug!(book_id, "committed and released book lock");
        Ok(())
    }

    pub fn rollback(self) -> Result<()> {
        let book_id = self.book_id;
        self.tx.rollback()?;
        debug!(book_id, "rolled back and released book lock");
        Ok(())
    }
}

impl Deref for BookLock<'_> {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::connection::open;

    fn seeded() -> Connection {
        let conn = open(&Config::in_memory()).unwrap();
        conn.execute("INSERT INTO Books (title) VALUES ('Dune')", [])
            .unwrap();
        conn
    }

    fn title(conn: &Connection) -> String {
        conn.query_row("SELECT title FROM Books WHERE id = 1", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn lock_cycles_through_states() {
        let mut conn = seeded();
        assert_eq!(lock_state(&conn), LockState::Unlocked);

        let lock = BookLock::acquire(&mut conn, 1).unwrap();
        assert_eq!(lock_state(&lock), LockState::Locked);
        lock.release(true).unwrap();

        assert_eq!(lock_state(&conn), LockState::Unlocked);
    }

    #[test]
    fn commit_keeps_changes() {
        let mut conn = seeded();
        let lock = BookLock::acquire(&mut conn, 1).unwrap();
        lock.execute("UPDATE Books SET title = 'Dune Messiah' WHERE id = 1", [])
            .unwrap();
        lock.commit().unwrap();
        assert_eq!(title(&conn), "Dune Messiah");
    }

    #[test]
    fn rollback_discards_changes() {
        let mut conn = seeded();
        let lock = BookLock::acquire(&mut conn, 1).unwrap();
        lock.execute("UPDATE Books SET title = 'Dune Messiah' WHERE id = 1", [])
            .unwrap();
        lock.release(false).unwrap();
        assert_eq!(title(&conn), "Dune");
    }

    #[test]
    fn dropping_the_lock_rolls_back() {
        let mut conn = seeded();
        {
            let lock = BookLock::acquire(&mut conn, 1).unwrap();
            lock.execute("UPDATE Books SET title = 'Dune Messiah' WHERE id = 1", [])
                .unwrap();
        }
        assert_eq!(lock_state(&conn), LockState::Unlocked);
        assert_eq!(title(&conn), "Dune");
    }

    #[test]
    fn missing_row_leaves_connection_unlocked() {
        let mut conn = seeded();
        let err = BookLock::acquire(&mut conn, 99).unwrap_err();
        assert!(matches!(err, CatalogError::BookNotFound(99)));
        assert_eq!(lock_state(&conn), LockState::Unlocked);
    }
}
