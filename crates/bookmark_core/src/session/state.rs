//! Session states and menu input parsing.

use crate::model::user::User;

/// One node of the interactive session state machine.
///
/// States after account resolution own the resolved [`User`]; nothing can
/// reach the menu without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    AwaitEmail,
    ResolveAccount { email: String },
    CreateAccount { email: String },
    MainMenu { user: User },
    AddBookmark { user: User },
    ListBookmarks { user: User },
    Finished(SessionEnd),
}

impl SessionState {
    /// Initial state of every session.
    pub fn initial() -> Self {
        Self::AwaitEmail
    }
}

/// How a session ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user picked "Exit" from the menu.
    Exited,
    /// Standard input reached end of file.
    InputClosed,
}

/// Numbered main menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBookmark,
    ListBookmarks,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 3] = [Self::AddBookmark, Self::ListBookmarks, Self::Exit];

    /// Parses a trimmed menu answer; anything but `1`, `2` or `3` is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::AddBookmark),
            "2" => Some(Self::ListBookmarks),
            "3" => Some(Self::Exit),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::AddBookmark => 1,
            Self::ListBookmarks => 2,
            Self::Exit => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AddBookmark => "Add a bookmark",
            Self::ListBookmarks => "List my bookmarks",
            Self::Exit => "Exit",
        }
    }
}
