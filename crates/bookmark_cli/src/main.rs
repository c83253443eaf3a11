//! Interactive bookmark manager.
//!
//! # Responsibility
//! - Load settings, start logging, open the store.
//! - Run one session over stdin/stdout and map its outcome to an exit code.
//!
//! # Invariants
//! - `main` returns instead of calling `process::exit`, so the connection and
//!   the log handle are dropped on every path.

use bookmark_core::db::open_from_url;
use bookmark_core::{
    init_logging, DotenvSource, Session, Settings, SqliteBookmarkRepository,
    SqliteUserRepository,
};
use log::{debug, error, info};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let (settings, dotenv) = match Settings::from_env() {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Declared before the connection so it is dropped (and flushed) last.
    let _logger = match settings.logging.as_ref().map(init_logging).transpose() {
        Ok(handle) => handle,
        Err(err) => {
            eprintln!("logging disabled: {err}");
            None
        }
    };
    match &dotenv {
        DotenvSource::Loaded(path) => debug!(
            "event=config_load module=cli status=ok dotenv={}",
            path.display()
        ),
        DotenvSource::Absent => {
            debug!("event=config_load module=cli status=ok dotenv=absent")
        }
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        bookmark_core::core_version()
    );

    let conn = match open_from_url(&settings.database_url) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("could not connect to the database: {err}");
            return ExitCode::FAILURE;
        }
    };

    let users = SqliteUserRepository::new(&conn);
    let bookmarks = SqliteBookmarkRepository::new(&conn);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), &users, &bookmarks);

    match session.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=session_end module=cli status=error error={err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
