//! User-facing text for the session.

use crate::model::bookmark::Bookmark;
use crate::model::user::User;
use crate::session::state::MenuChoice;
use std::io::{self, Write};

pub(crate) const EMAIL_PROMPT: &str = "Enter your email: ";
pub(crate) const NAME_PROMPT: &str = "Enter your name: ";
pub(crate) const TITLE_PROMPT: &str = "Title: ";
pub(crate) const URL_PROMPT: &str = "URL: ";
pub(crate) const NEW_ACCOUNT_GREETING: &str = "Welcome! Let's create your account.";
pub(crate) const INVALID_CHOICE: &str = "Invalid choice. Please enter 1, 2, or 3.";
pub(crate) const FAREWELL: &str = "Goodbye!";
pub(crate) const NO_BOOKMARKS: &str = "Empty. You haven't added any bookmarks yet.";
pub(crate) const BOOKMARKS_HEADER: &str = "--- Your bookmarks ---";

pub(crate) fn write_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "What would you like to do?")?;
    for choice in MenuChoice::ALL {
        writeln!(out, " ({}) {}", choice.number(), choice.label())?;
    }
    Ok(())
}

pub(crate) fn write_returning_user(out: &mut impl Write, user: &User) -> io::Result<()> {
    writeln!(out, "Welcome back, {}! Your user ID is {}.", user.name, user.id)
}

pub(crate) fn write_account_created(out: &mut impl Write, user: &User) -> io::Result<()> {
    writeln!(
        out,
        "Account created for {}. Your user ID is {}. Save this ID to fetch your saved bookmarks later.",
        user.name, user.id
    )
}

pub(crate) fn write_bookmarks(out: &mut impl Write, bookmarks: &[Bookmark]) -> io::Result<()> {
    if bookmarks.is_empty() {
        return writeln!(out, "{NO_BOOKMARKS}");
    }

    writeln!(out)?;
    writeln!(out, "{BOOKMARKS_HEADER}")?;
    for bookmark in bookmarks {
        writeln!(out)?;
        writeln!(out, "Title: {}", bookmark.title)?;
        writeln!(out, "URL: {}", bookmark.url)?;
        writeln!(out, "Created At: {}", bookmark.created_at_display())?;
    }
    Ok(())
}
