//! Process-wide settings, built once in `main` and handed by reference to
//! whatever needs storage or logging.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use tracing::Level;

use crate::error::{CatalogError, Result};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".book-catalog";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "catalog.sqlite";
const LOG_FILE_NAME: &str = "catalog.log";

const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(5_000);

pub const ENV_DB: &str = "BOOK_CATALOG_DB";
pub const ENV_LOCK_TIMEOUT_MS: &str = "BOOK_CATALOG_LOCK_TIMEOUT_MS";
pub const ENV_LOG: &str = "BOOK_CATALOG_LOG";
pub const ENV_LOG_LEVEL: &str = "BOOK_CATALOG_LOG_LEVEL";

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    /// Private in-memory database, gone when the connection closes.
    InMemory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db: DbLocation,
    /// How long a session waits for another session's lock before giving up.
    pub lock_timeout: Duration,
    pub log_path: PathBuf,
    pub log_level: Level,
}

impl Config {
    /// Defaults under `~/.book-catalog/`, overridden by the `BOOK_CATALOG_*`
    /// environment variables.
    pub fn from_env() -> Result<Self> {
        let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        Self::resolve(home.as_deref(), |key| std::env::var(key).ok())
    }

    /// Build a configuration from an explicit home directory and variable
    /// lookup.
    pub fn resolve(home: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_dir = || -> Result<PathBuf> {
            home.map(|home| home.join(DATA_DIR_NAME))
                .ok_or_else(|| CatalogError::Config("could not locate home directory".into()))
        };

        let db = match lookup(ENV_DB) {
            Some(path) if path == ":memory:" => DbLocation::InMemory,
            Some(path) => DbLocation::File(PathBuf::from(path)),
            None => DbLocation::File(data_dir()?.join(DB_FILE_NAME)),
        };

        let lock_timeout = match lookup(ENV_LOCK_TIMEOUT_MS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| {
                    CatalogError::Config(format!("{ENV_LOCK_TIMEOUT_MS} must be milliseconds, got {raw:?}"))
                })?,
            None => DEFAULT_LOCK_TIMEOUT,
        };

        let log_path = match lookup(ENV_LOG) {
            Some(path) => PathBuf::from(path),
            None => data_dir()?.join(LOG_FILE_NAME),
        };

        let log_level = match lookup(ENV_LOG_LEVEL) {
            Some(raw) => raw.trim().parse::<Level>().map_err(|_| {
                CatalogError::Config(format!("{ENV_LOG_LEVEL} must be a log level, got {raw:?}"))
            })?,
            None => Level::INFO,
        };

        Ok(Self {
            db,
            lock_timeout,
            log_path,
            log_level,
        })
    }

    /// Configuration for a database file at `path`, logging next to it.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let log_path = path.with_extension("log");
        Self {
            db: DbLocation::File(path),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            log_path,
            log_level: Level::INFO,
        }
    }

    /// Configuration for a throwaway in-memory database.
    pub fn in_memory() -> Self {
        Self {
            db: DbLocation::InMemory,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            log_path: std::env::temp_dir().join(LOG_FILE_NAME),
            log_level: Level::INFO,
        }
    }

    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = lock_timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_live_under_home() {
        let config = Config::resolve(Some(Path::new("/home/reader")), lookup(&[])).unwrap();
        assert_eq!(
            config.db,
            DbLocation::File(PathBuf::from("/home/reader/.book-catalog/catalog.sqlite"))
        );
        assert_eq!(
            config.log_path,
            PathBuf::from("/home/reader/.book-catalog/catalog.log")
        );
        assert_eq!(config.lock_timeout, Duration::from_secs(5));
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn environment_overrides() {
        let config = Config::resolve(
            None,
            lookup(&[
                (ENV_DB, ":memory:"),
                (ENV_LOCK_TIMEOUT_MS, "250"),
                (ENV_LOG, "/tmp/catalog.log"),
                (ENV_LOG_LEVEL, "debug"),
            ]),
        )
        .unwrap();
        assert_eq!(config.db, DbLocation::InMemory);
        assert_eq!(config.lock_timeout, Duration::from_millis(250));
        assert_eq!(config.log_path, PathBuf::from("/tmp/catalog.log"));
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn rejects_a_malformed_timeout() {
        let err = Config::resolve(
            Some(Path::new("/home/reader")),
            lookup(&[(ENV_LOCK_TIMEOUT_MS, "soon")]),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn missing_home_needs_explicit_paths() {
        assert!(Config::resolve(None, lookup(&[])).is_err());
    }
}
