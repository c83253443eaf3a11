//! Core logic for the bookmark CLI.
//! Storage, repositories and the interactive session live here; the binary
//! only wires them to the terminal.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod session;

pub use config::{ConfigError, DotenvSource, LogSettings, Settings};
pub use logging::{init_logging, LoggingError};
pub use model::bookmark::{Bookmark, BookmarkId};
pub use model::email::{validate_email, EmailValidationError};
pub use model::user::{User, UserId};
pub use repo::bookmark_repo::{BookmarkRepository, SqliteBookmarkRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use session::{MenuChoice, Session, SessionEnd, SessionError, SessionState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
