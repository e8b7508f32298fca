use rusqlite::{Connection, Error as SqlError, ErrorCode, OptionalExtension};

use crate::error::{CatalogError, Result};
use crate::models::Publisher;

/// All publishers by name. The "Unknown" placeholder is included so forms
/// can offer it as an explicit choice.
pub fn fetch_publishers(conn: &Connection) -> Result<Vec<Publisher>> {
    let mut stmt = conn.prepare("SELECT id, name FROM Publishers ORDER BY name COLLATE NOCASE")?;

    let publishers = stmt
        .query_map([], |row| {
            Ok(Publisher {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(publishers)
}

/// Look up one publisher. A dangling id is reported as
/// [`CatalogError::PublisherNotFound`] so a save can refuse it before
/// anything is written.
pub fn load_publisher(conn: &Connection, id: i64) -> Result<Publisher> {
    conn.query_row("SELECT id, name FROM Publishers WHERE id = ?1", [id], |row| {
        Ok(Publisher {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })
    .optional()?
    .ok_or(CatalogError::PublisherNotFound(id))
}

/// Insert a publisher and return the hydrated row.
pub fn create_publisher(conn: &Connection, name: &str) -> Result<Publisher> {
    conn.execute("INSERT INTO Publishers (name) VALUES (?1)", [name])
        .map_err(|err| map_unique_constraint(err, name))?;

    Ok(Publisher {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

/// Publisher names are unique; report a clash by name instead of as a raw
/// constraint failure.
fn map_unique_constraint(err: SqlError, name: &str) -> CatalogError {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        CatalogError::DuplicatePublisher(name.to_string())
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::connection::open;

    #[test]
    fn create_and_list() {
        let conn = open(&Config::in_memory()).unwrap();
        let ace = create_publisher(&conn, "Ace Books").unwrap();
        assert_eq!(load_publisher(&conn, ace.id).unwrap(), ace);

        let names: Vec<String> = fetch_publishers(&conn)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Ace Books", "Unknown"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let conn = open(&Config::in_memory()).unwrap();
        create_publisher(&conn, "Tor").unwrap();
        assert!(matches!(
            create_publisher(&conn, "Tor"),
            Err(CatalogError::DuplicatePublisher(name)) if name == "Tor"
        ));
    }

    #[test]
    fn missing_publisher() {
        let conn = open(&Config::in_memory()).unwrap();
        assert!(matches!(
            load_publisher(&conn, 77),
            Err(CatalogError::PublisherNotFound(77))
        ));
    }
}
