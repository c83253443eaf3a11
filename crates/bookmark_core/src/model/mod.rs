//! Domain model for users, bookmarks and input shape checks.
//!
//! # Responsibility
//! - Define the value snapshots handed out by repositories.
//! - Own the email shape check used before any store lookup.
//!
//! # Invariants
//! - Model values are plain snapshots; the store owns the records.
//! - IDs and creation timestamps are only ever assigned by the store.

pub mod bookmark;
pub mod email;
pub mod user;
