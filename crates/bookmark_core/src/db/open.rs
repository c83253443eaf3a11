//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Resolve `DATABASE_URL` style connection strings.
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Create the schema before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have both tables in place.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const MEMORY_URLS: &[&str] = &[":memory:", "sqlite::memory:", "sqlite://:memory:"];
const SQLITE_SCHEME: &str = "sqlite";
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Where a connection string points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbTarget {
    Memory,
    File(PathBuf),
}

impl DbTarget {
    /// Parses a connection string.
    ///
    /// Accepted shapes: `sqlite::memory:`, `:memory:`, `sqlite://<path>`,
    /// `sqlite:<path>` and a bare file path. Any other `<scheme>:` prefix is
    /// rejected instead of being opened as a file of that name.
    pub fn parse(url: &str) -> DbResult<Self> {
        let trimmed = url.trim();
        if MEMORY_URLS.contains(&trimmed) {
            return Ok(Self::Memory);
        }
        let path = match url_scheme(trimmed) {
            Some(scheme) if scheme.eq_ignore_ascii_case(SQLITE_SCHEME) => {
                let rest = &trimmed[scheme.len() + 1..];
                rest.strip_prefix("//").unwrap_or(rest)
            }
            Some(_) => return Err(DbError::InvalidUrl(url.to_string())),
            None => trimmed,
        };
        // Query parameters such as `?mode=rwc` are driver options we do not interpret.
        let path = path.split('?').next().unwrap_or_default();

        if path.is_empty() {
            return Err(DbError::InvalidUrl(url.to_string()));
        }
        Ok(Self::File(PathBuf::from(path)))
    }
}

/// Returns the scheme of `url` when it starts with one.
///
/// Single letters are left alone so `C:\data\bookmarks.db` stays a path.
fn url_scheme(url: &str) -> Option<&str> {
    let (scheme, _) = url.split_once(':')?;
    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_valid = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    (scheme.len() > 1 && starts_alpha && rest_valid).then_some(scheme)
}

/// Opens the database named by a connection string.
pub fn open_from_url(url: &str) -> DbResult<Connection> {
    match DbTarget::parse(url)? {
        DbTarget::Memory => open_db_in_memory(),
        DbTarget::File(path) => open_db(path),
    }
}

/// Opens a SQLite database file and creates the schema if needed.
///
/// # Side effects
/// - Creates the file when it does not exist yet.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with("file", || Connection::open(path))
}

/// Opens an in-memory SQLite database with the schema in place.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={err}",
                started_at.elapsed().as_millis()
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::DbTarget;
    use crate::db::DbError;
    use std::path::PathBuf;

    #[test]
    fn parse_recognizes_memory_targets() {
        assert_eq!(DbTarget::parse("sqlite::memory:").unwrap(), DbTarget::Memory);
        assert_eq!(DbTarget::parse(" :memory: ").unwrap(), DbTarget::Memory);
    }

    #[test]
    fn parse_strips_scheme_and_query() {
        assert_eq!(
            DbTarget::parse("sqlite://data/bookmarks.db?mode=rwc").unwrap(),
            DbTarget::File(PathBuf::from("data/bookmarks.db"))
        );
        assert_eq!(
            DbTarget::parse("sqlite:bookmarks.db").unwrap(),
            DbTarget::File(PathBuf::from("bookmarks.db"))
        );
        assert_eq!(
            DbTarget::parse("/var/lib/bookmarks.db").unwrap(),
            DbTarget::File(PathBuf::from("/var/lib/bookmarks.db"))
        );
    }

    #[test]
    fn parse_rejects_foreign_schemes() {
        for url in ["postgres://u@h/db", "mysql://root@localhost/bookmarks", "file:x.db"] {
            let err = DbTarget::parse(url).unwrap_err();
            assert!(matches!(err, DbError::InvalidUrl(_)), "{url} should be rejected");
        }
    }

    #[test]
    fn parse_keeps_drive_letter_paths() {
        assert_eq!(
            DbTarget::parse(r"C:\data\bookmarks.db").unwrap(),
            DbTarget::File(PathBuf::from(r"C:\data\bookmarks.db"))
        );
        assert_eq!(
            DbTarget::parse("SQLite:bookmarks.db").unwrap(),
            DbTarget::File(PathBuf::from("bookmarks.db"))
        );
    }

    #[test]
    fn parse_rejects_empty_path() {
        let err = DbTarget::parse("sqlite://").unwrap_err();
        assert!(matches!(err, DbError::InvalidUrl(_)));
    }
}
