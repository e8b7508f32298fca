use std::fs;

use rusqlite::{Connection, OptionalExtension};
use tracing::info;

use crate::config::{Config, DbLocation};
use crate::error::Result;
use crate::models::{DEFAULT_PUBLISHER_ID, DEFAULT_PUBLISHER_NAME};

/// SQL expression for "now" with millisecond precision. Every timestamp in
/// the catalog comes from here, so the store is the only clock that
/// `date_added`, `last_modified`, and audit timestamps ever see.
pub(crate) const NOW: &str = "strftime('%Y-%m-%d %H:%M:%f', 'now')";

/// Open the configured database, apply the lock timeout, and make sure the
/// schema exists. `PRAGMA foreign_keys = ON` is set on every connection so
/// the publisher and audit references are enforced.
pub fn open(config: &Config) -> Result<Connection> {
    let conn = match &config.db {
        DbLocation::File(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            info!(path = %path.display(), "opening catalog database");
            Connection::open(path)?
        }
        DbLocation::InMemory => Connection::open_in_memory()?,
    };

    conn.busy_timeout(config.lock_timeout)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create the tables, triggers, and the default publisher if they are
/// missing. Safe to run on every start.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Publishers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )",
        [],
    )?;

    // Only write when the seed row is missing; opening must not need the
    // write lock another session may be holding.
    let seeded = conn
        .query_row(
            "SELECT 1 FROM Publishers WHERE id = ?1",
            [DEFAULT_PUBLISHER_ID],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !seeded {
        conn.execute(
            "INSERT OR IGNORE INTO Publishers (id, name) VALUES (?1, ?2)",
            (DEFAULT_PUBLISHER_ID, DEFAULT_PUBLISHER_NAME),
        )?;
    }

    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS Books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                summary TEXT NOT NULL DEFAULT '',
                year_published INTEGER NOT NULL DEFAULT 0,
                publisher_id INTEGER NOT NULL DEFAULT {DEFAULT_PUBLISHER_ID}
                    REFERENCES Publishers(id),
                isbn TEXT NOT NULL DEFAULT '',
                date_added TEXT NOT NULL DEFAULT ({NOW}),
                last_modified TEXT NOT NULL DEFAULT ({NOW})
            )"
        ),
        [],
    )?;

    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS book_audit_trail (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                book_id INTEGER NOT NULL REFERENCES Books(id) ON DELETE CASCADE,
                timestamp TEXT NOT NULL DEFAULT ({NOW}),
                entry_msg TEXT NOT NULL
            )"
        ),
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS book_audit_trail_book
            ON book_audit_trail (book_id, timestamp)",
        [],
    )?;

    conn.execute(
        "CREATE TRIGGER IF NOT EXISTS book_audit_trail_append_only
            BEFORE UPDATE ON book_audit_trail
            BEGIN
                SELECT RAISE(ABORT, 'audit trail entries are append-only');
            END",
        [],
    )?;

    Ok(())
}
