use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::AuditEntry;

/// Append one line to a book's history. The timestamp is assigned by the
/// store. Callers are expected to hold the book's lock so the entry commits
/// or rolls back together with the change it describes.
pub(crate) fn append_audit_entry(conn: &Connection, book_id: i64, message: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO book_audit_trail (book_id, entry_msg) VALUES (?1, ?2)",
        params![book_id, message],
    )?;
    Ok(conn.last_insert_rowid())
}

/// A book's history, oldest first. Entries written in the same millisecond
/// keep their insertion order.
pub fn fetch_audit_trail(conn: &Connection, book_id: i64) -> Result<Vec<AuditEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, book_id, timestamp, entry_msg
         FROM book_audit_trail
         WHERE book_id = ?1
         ORDER BY timestamp, id",
    )?;

    let entries = stmt
        .query_map([book_id], |row| {
            Ok(AuditEntry {
                id: row.get(0)?,
                book_id: row.get(1)?,
                timestamp: row.get(2)?,
                message: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::connection::open;

    #[test]
    fn entries_come_back_in_insertion_order() {
        let conn = open(&Config::in_memory()).unwrap();
        conn.execute("INSERT INTO Books (title) VALUES ('Dune')", [])
            .unwrap();

        append_audit_entry(&conn, 1, "first").unwrap();
        append_audit_entry(&conn, 1, "second").unwrap();

        let messages: Vec<String> = fetch_audit_trail(&conn, 1)
            .unwrap()
            .into_iter()
            .map(|entry| entry.message)
            .collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn entries_need_an_existing_book() {
        let conn = open(&Config::in_memory()).unwrap();
        assert!(append_audit_entry(&conn, 5, "orphan").is_err());
    }
}
