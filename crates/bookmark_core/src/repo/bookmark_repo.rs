//! Bookmark repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist bookmarks for a user and list them back.
//!
//! # Invariants
//! - `create_bookmark` returns a value whose every field was read back from
//!   the store, or an error. Never a partial bookmark.
//! - Listing order is `created_at ASC, id ASC`.

use crate::model::bookmark::{Bookmark, BookmarkId};
use crate::model::user::UserId;
use crate::repo::{RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::time::Instant;

const BOOKMARK_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    title,
    url,
    created_at
FROM bookmarks";

/// Repository interface for bookmark insert and listing.
pub trait BookmarkRepository {
    fn create_bookmark(&self, user_id: UserId, title: &str, url: &str) -> RepoResult<Bookmark>;
    fn list_bookmarks_for_user(&self, user_id: UserId) -> RepoResult<Vec<Bookmark>>;
}

/// SQLite-backed bookmark repository.
pub struct SqliteBookmarkRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookmarkRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn created_at_of(&self, id: BookmarkId) -> RepoResult<i64> {
        self.conn
            .query_row(
                "SELECT created_at FROM bookmarks WHERE id = ?1;",
                [id],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
            .ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "bookmark {id} was not readable right after insert"
                ))
            })
    }
}

impl BookmarkRepository for SqliteBookmarkRepository<'_> {
    fn create_bookmark(&self, user_id: UserId, title: &str, url: &str) -> RepoResult<Bookmark> {
        let started_at = Instant::now();

        self.conn.execute(
            "INSERT INTO bookmarks (user_id, title, url) VALUES (?1, ?2, ?3);",
            params![user_id, title, url],
        )?;
        let id = self.conn.last_insert_rowid();
        let created_at = self.created_at_of(id)?;

        debug!(
            "event=bookmark_create module=repo status=ok user_id={user_id} bookmark_id={id} duration_ms={}",
            started_at.elapsed().as_millis()
        );

        Ok(Bookmark {
            id,
            user_id,
            title: title.to_string(),
            url: url.to_string(),
            created_at,
        })
    }

    fn list_bookmarks_for_user(&self, user_id: UserId) -> RepoResult<Vec<Bookmark>> {
        let started_at = Instant::now();

        let mut stmt = self.conn.prepare(&format!(
            "{BOOKMARK_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY created_at ASC, id ASC;"
        ))?;
        let bookmarks = stmt
            .query_map([user_id], parse_bookmark_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "event=bookmark_list module=repo status=ok user_id={user_id} count={} duration_ms={}",
            bookmarks.len(),
            started_at.elapsed().as_millis()
        );
        Ok(bookmarks)
    }
}

fn parse_bookmark_row(row: &Row<'_>) -> rusqlite::Result<Bookmark> {
    Ok(Bookmark {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        title: row.get("title")?,
        url: row.get("url")?,
        created_at: row.get("created_at")?,
    })
}
