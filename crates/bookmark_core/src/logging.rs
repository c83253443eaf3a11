//! Rolling file log for the bookmark CLI.
//!
//! Events are single-line `event=... module=... status=...` records carrying
//! ids, counts and durations. Emails, names, titles and URLs stay out of the log.
//! stdout is never a sink; it belongs to the interactive session.

use crate::config::LogSettings;
use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, LogSpecification, Logger, LoggerHandle, Naming,
};
use log::info;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

const LOG_FILE_BASENAME: &str = "bookmarks";
const ROTATE_AT_BYTES: u64 = 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 3;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory `{}`: {source}", .dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to start logger: {0}")]
    Start(#[from] FlexiLoggerError),
}

/// Starts the process-wide file logger.
///
/// The returned handle must be kept alive for as long as records should be
/// written; dropping it flushes and closes the current file. The logger can
/// only be started once per process.
pub fn init_logging(settings: &LogSettings) -> Result<LoggerHandle, LoggingError> {
    std::fs::create_dir_all(&settings.dir).map_err(|source| LoggingError::CreateDir {
        dir: settings.dir.clone(),
        source,
    })?;

    let spec = LogSpecification::builder().default(settings.level).build();
    let handle = Logger::with(spec)
        .log_to_file(
            FileSpec::default()
                .directory(settings.dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    info!(
        "event=logging_init module=logging status=ok level={} version={}",
        settings.level,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}
