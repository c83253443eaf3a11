//! Bookmark domain model.
//!
//! # Invariants
//! - `user_id` references an existing user at creation time.
//! - `created_at` is set by the store on insert and never changes.

use crate::model::user::UserId;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned bookmark identifier.
pub type BookmarkId = i64;

/// A saved URL owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub user_id: UserId,
    /// Free text, may be empty.
    pub title: String,
    /// Stored verbatim; no format enforcement.
    pub url: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Bookmark {
    /// Creation time as a UTC datetime.
    ///
    /// Returns `None` only when the stored value is outside chrono's range.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }

    /// Creation time rendered as RFC 3339, falling back to raw milliseconds.
    pub fn created_at_display(&self) -> String {
        match self.created_at_utc() {
            Some(at) => at.to_rfc3339_opts(SecondsFormat::Secs, true),
            None => format!("{}ms", self.created_at),
        }
    }
}
