//! SQLite storage bootstrap.
//!
//! # Responsibility
//! - Resolve the externally supplied connection string into a SQLite target.
//! - Open and configure SQLite connections for the bookmark store.
//! - Create the `users` and `bookmarks` tables before any repository runs.
//!
//! # Invariants
//! - The schema script is idempotent (`CREATE ... IF NOT EXISTS`).

use thiserror::Error;

mod open;

pub use open::{open_db, open_db_in_memory, open_from_url, DbTarget};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid database url `{0}`: expected `sqlite:` scheme or a file path")]
    InvalidUrl(String),
}
