//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Register a user once per email.
//! - Resolve a user by email for session start.
//!
//! # Invariants
//! - No two rows share an email.
//! - `create_user` never inserts when the email is already present.
//!
//! # Known limitation
//! The existence check and the insert are two round-trips. Two processes
//! racing on the same unseen email can both pass the check; the UNIQUE
//! column then rejects the loser, which is reported as `EmailTaken`.

use crate::model::user::User;
use crate::repo::{is_unique_violation, RepoError, RepoResult};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::time::Instant;

/// Repository interface for user registration and lookup.
pub trait UserRepository {
    fn create_user(&self, name: &str, email: &str) -> RepoResult<User>;
    fn get_user_by_email(&self, email: &str) -> RepoResult<User>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1);",
            [email],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, name: &str, email: &str) -> RepoResult<User> {
        let started_at = Instant::now();

        if self.email_exists(email)? {
            debug!("event=user_create module=repo status=rejected reason=email_taken");
            return Err(RepoError::EmailTaken);
        }

        let inserted = self.conn.execute(
            "INSERT INTO users (name, email) VALUES (?1, ?2);",
            params![name, email],
        );
        if let Err(err) = inserted {
            if is_unique_violation(&err) {
                warn!("event=user_create module=repo status=rejected reason=unique_violation");
                return Err(RepoError::EmailTaken);
            }
            return Err(err.into());
        }

        let id = self.conn.last_insert_rowid();
        debug!(
            "event=user_create module=repo status=ok user_id={id} duration_ms={}",
            started_at.elapsed().as_millis()
        );

        Ok(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    fn get_user_by_email(&self, email: &str) -> RepoResult<User> {
        let started_at = Instant::now();

        let found = self
            .conn
            .query_row(
                "SELECT id, name FROM users WHERE email = ?1;",
                [email],
                |row| Ok((row.get::<_, i64>("id")?, row.get::<_, String>("name")?)),
            )
            .optional()?;

        let Some((id, name)) = found else {
            debug!(
                "event=user_lookup module=repo status=not_found duration_ms={}",
                started_at.elapsed().as_millis()
            );
            return Err(RepoError::NotFound(email.to_string()));
        };

        debug!(
            "event=user_lookup module=repo status=ok user_id={id} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(User {
            id,
            name,
            email: email.to_string(),
        })
    }
}
