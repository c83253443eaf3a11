//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for users and bookmarks.
//! - Isolate SQL details from the session loop.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `EmailTaken`) in
//!   addition to store transport errors.
//! - Returned values are fully populated from the store, never partial.

use crate::db::DbError;
use thiserror::Error;

pub mod bookmark_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error taxonomy shared by the user and bookmark repositories.
#[derive(Debug, Error)]
pub enum RepoError {
    /// No user row matches the requested email.
    #[error("no user registered with email `{0}`")]
    NotFound(String),
    /// Another user already owns the email.
    #[error("email already in use")]
    EmailTaken,
    #[error("{0}")]
    Db(#[from] DbError),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
