//! Interactive terminal session.
//!
//! # Responsibility
//! - Drive the prompt loop as explicit [`SessionState`] transitions.
//! - Dispatch to the user and bookmark repositories and render results.
//!
//! # Invariants
//! - Malformed emails and unknown menu answers re-prompt; they never end the session.
//! - A failed bookmark insert or listing aborts only that action.
//! - End of input ends the session normally at any prompt.
//! - Input is decoded lossily; no byte sequence is a read error.

mod render;
pub mod state;

pub use state::{MenuChoice, SessionEnd, SessionState};

use crate::model::email::validate_email;
use crate::model::user::User;
use crate::repo::bookmark_repo::BookmarkRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use log::{info, warn};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Conditions that end a session abnormally.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("error retrieving user: {0}")]
    Lookup(RepoError),
    #[error("could not create user: {0}")]
    CreateUser(RepoError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// One interactive run bound to an input, an output and two repositories.
pub struct Session<'repo, I, O, U: ?Sized, B: ?Sized> {
    input: I,
    output: O,
    users: &'repo U,
    bookmarks: &'repo B,
}

impl<'repo, I, O, U, B> Session<'repo, I, O, U, B>
where
    I: BufRead,
    O: Write,
    U: UserRepository + ?Sized,
    B: BookmarkRepository + ?Sized,
{
    pub fn new(input: I, output: O, users: &'repo U, bookmarks: &'repo B) -> Self {
        Self {
            input,
            output,
            users,
            bookmarks,
        }
    }

    /// Runs from [`SessionState::initial`] until a terminal state or an error.
    pub fn run(&mut self) -> SessionResult<SessionEnd> {
        let mut state = SessionState::initial();
        loop {
            state = self.step(state)?;
            if let SessionState::Finished(end) = state {
                info!("event=session_end module=session status=ok end={end:?}");
                return Ok(end);
            }
        }
    }

    /// Performs exactly one transition.
    ///
    /// `Finished` maps to itself, so stepping a terminal state is a no-op.
    pub fn step(&mut self, state: SessionState) -> SessionResult<SessionState> {
        match state {
            SessionState::AwaitEmail => self.await_email(),
            SessionState::ResolveAccount { email } => self.resolve_account(email),
            SessionState::CreateAccount { email } => self.create_account(email),
            SessionState::MainMenu { user } => self.main_menu(user),
            SessionState::AddBookmark { user } => self.add_bookmark(user),
            SessionState::ListBookmarks { user } => self.list_bookmarks(user),
            finished @ SessionState::Finished(_) => Ok(finished),
        }
    }

    /// Consumes the session and hands back its output sink.
    pub fn into_output(self) -> O {
        self.output
    }

    fn await_email(&mut self) -> SessionResult<SessionState> {
        let Some(email) = self.prompt(render::EMAIL_PROMPT)? else {
            return Ok(SessionState::Finished(SessionEnd::InputClosed));
        };

        match validate_email(&email) {
            Ok(()) => Ok(SessionState::ResolveAccount { email }),
            Err(err) => {
                writeln!(self.output, "Invalid email format: {err}.")?;
                Ok(SessionState::AwaitEmail)
            }
        }
    }

    fn resolve_account(&mut self, email: String) -> SessionResult<SessionState> {
        match self.users.get_user_by_email(&email) {
            Ok(user) => {
                render::write_returning_user(&mut self.output, &user)?;
                info!(
                    "event=session_user module=session status=ok user_id={} created=false",
                    user.id
                );
                Ok(SessionState::MainMenu { user })
            }
            Err(RepoError::NotFound(_)) => Ok(SessionState::CreateAccount { email }),
            Err(err) => Err(SessionError::Lookup(err)),
        }
    }

    fn create_account(&mut self, email: String) -> SessionResult<SessionState> {
        writeln!(self.output, "{}", render::NEW_ACCOUNT_GREETING)?;
        let Some(name) = self.prompt(render::NAME_PROMPT)? else {
            return Ok(SessionState::Finished(SessionEnd::InputClosed));
        };

        let user = self
            .users
            .create_user(&name, &email)
            .map_err(SessionError::CreateUser)?;
        render::write_account_created(&mut self.output, &user)?;
        info!(
            "event=session_user module=session status=ok user_id={} created=true",
            user.id
        );
        Ok(SessionState::MainMenu { user })
    }

    fn main_menu(&mut self, user: User) -> SessionResult<SessionState> {
        render::write_menu(&mut self.output)?;
        let Some(answer) = self.prompt("")? else {
            return Ok(SessionState::Finished(SessionEnd::InputClosed));
        };

        let next = match MenuChoice::parse(&answer) {
            Some(MenuChoice::AddBookmark) => SessionState::AddBookmark { user },
            Some(MenuChoice::ListBookmarks) => SessionState::ListBookmarks { user },
            Some(MenuChoice::Exit) => {
                writeln!(self.output, "{}", render::FAREWELL)?;
                SessionState::Finished(SessionEnd::Exited)
            }
            None => {
                writeln!(self.output, "{}", render::INVALID_CHOICE)?;
                SessionState::MainMenu { user }
            }
        };
        Ok(next)
    }

    fn add_bookmark(&mut self, user: User) -> SessionResult<SessionState> {
        let Some(title) = self.prompt(render::TITLE_PROMPT)? else {
            return Ok(SessionState::Finished(SessionEnd::InputClosed));
        };
        let Some(url) = self.prompt(render::URL_PROMPT)? else {
            return Ok(SessionState::Finished(SessionEnd::InputClosed));
        };

        match self.bookmarks.create_bookmark(user.id, &title, &url) {
            Ok(bookmark) => writeln!(self.output, "Saved: {}", bookmark.title)?,
            Err(err) => {
                warn!(
                    "event=bookmark_add module=session status=error user_id={} error={err}",
                    user.id
                );
                writeln!(self.output, "could not save bookmark: {err}")?;
            }
        }
        Ok(SessionState::MainMenu { user })
    }

    fn list_bookmarks(&mut self, user: User) -> SessionResult<SessionState> {
        match self.bookmarks.list_bookmarks_for_user(user.id) {
            Ok(bookmarks) => render::write_bookmarks(&mut self.output, &bookmarks)?,
            Err(err) => {
                warn!(
                    "event=bookmark_list module=session status=error user_id={} error={err}",
                    user.id
                );
                writeln!(self.output, "could not retrieve bookmarks: {err}")?;
            }
        }
        Ok(SessionState::MainMenu { user })
    }

    /// Writes `text`, then reads one trimmed line. `None` means end of input.
    ///
    /// Bytes that are not UTF-8 are replaced with U+FFFD rather than failing
    /// the read, so odd terminal encodings never end the session.
    fn prompt(&mut self, text: &str) -> SessionResult<Option<String>> {
        if !text.is_empty() {
            write!(self.output, "{text}")?;
        }
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }
}
