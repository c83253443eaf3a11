//! Process configuration loaded from the environment.
//!
//! # Responsibility
//! - Optionally merge a local `.env` file into the process environment.
//! - Read the connection string and the optional file-logging knobs.
//!
//! # Invariants
//! - A missing `.env` file is not an error; a malformed one is.
//! - Variables already present in the environment win over `.env` values.
//! - The log level is only read when a log directory is configured.

use log::LevelFilter;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const LOG_LEVEL_VAR: &str = "BOOKMARK_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "BOOKMARK_LOG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable `{0}` is not set")]
    MissingVar(&'static str),
    #[error("failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("`{var}` must be one of off|error|warn|info|debug|trace, got `{value}`")]
    InvalidLogLevel { var: &'static str, value: String },
    #[error("`{var}` must be an absolute path, got `{value}`")]
    RelativeLogDir { var: &'static str, value: String },
}

/// Startup settings for one CLI process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    /// `None` when `BOOKMARK_LOG_DIR` is unset; nothing is logged then.
    pub logging: Option<LogSettings>,
}

/// Where and how verbosely the file logger writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    /// Always absolute.
    pub dir: PathBuf,
}

/// Result of looking for a `.env` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotenvSource {
    Loaded(PathBuf),
    Absent,
}

impl Settings {
    /// Loads `.env` (if any) and then reads settings from the process environment.
    pub fn from_env() -> Result<(Self, DotenvSource), ConfigError> {
        let source = load_dotenv()?;
        let settings = Self::from_lookup(|key| std::env::var(key).ok())?;
        Ok((settings, source))
    }

    /// Builds settings from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database_url = read(DATABASE_URL_VAR).ok_or(ConfigError::MissingVar(DATABASE_URL_VAR))?;

        let logging = match read(LOG_DIR_VAR) {
            Some(dir) => Some(LogSettings {
                dir: parse_log_dir(dir)?,
                level: match read(LOG_LEVEL_VAR) {
                    Some(level) => parse_log_level(level)?,
                    None => default_log_level(),
                },
            }),
            None => None,
        };

        Ok(Self {
            database_url,
            logging,
        })
    }
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn parse_log_level(value: String) -> Result<LevelFilter, ConfigError> {
    value
        .parse::<LevelFilter>()
        .map_err(|_| ConfigError::InvalidLogLevel {
            var: LOG_LEVEL_VAR,
            value,
        })
}

fn parse_log_dir(value: String) -> Result<PathBuf, ConfigError> {
    if !Path::new(&value).is_absolute() {
        return Err(ConfigError::RelativeLogDir {
            var: LOG_DIR_VAR,
            value,
        });
    }
    Ok(PathBuf::from(value))
}

/// Merges `./.env` (searched upward from the working directory) into the environment.
pub fn load_dotenv() -> Result<DotenvSource, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(DotenvSource::Loaded(path)),
        Err(err) if err.not_found() => Ok(DotenvSource::Absent),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        default_log_level, ConfigError, LogSettings, Settings, DATABASE_URL_VAR, LOG_DIR_VAR,
        LOG_LEVEL_VAR,
    };
    use log::LevelFilter;
    use std::collections::HashMap;

    fn lookup_from<'a>(
        pairs: &'a [(&'a str, &'a str)],
    ) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key| map.get(key).map(|value| value.to_string())
    }

    fn absolute_log_dir() -> String {
        std::env::temp_dir()
            .join("bookmark-logs")
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn database_url_is_required() {
        let err = Settings::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(var) if var == DATABASE_URL_VAR));

        let err = Settings::from_lookup(lookup_from(&[(DATABASE_URL_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(_)));
    }

    #[test]
    fn logging_is_off_without_a_directory() {
        let settings =
            Settings::from_lookup(lookup_from(&[(DATABASE_URL_VAR, " sqlite://bookmarks.db ")]))
                .unwrap();
        assert_eq!(settings.database_url, "sqlite://bookmarks.db");
        assert_eq!(settings.logging, None);
    }

    #[test]
    fn bad_log_level_is_ignored_while_logging_is_off() {
        let settings = Settings::from_lookup(lookup_from(&[
            (DATABASE_URL_VAR, ":memory:"),
            (LOG_LEVEL_VAR, "verbose"),
        ]))
        .unwrap();
        assert_eq!(settings.logging, None);
    }

    #[test]
    fn log_level_defaults_and_parses_case_insensitively() {
        let dir = absolute_log_dir();

        let settings = Settings::from_lookup(lookup_from(&[
            (DATABASE_URL_VAR, ":memory:"),
            (LOG_DIR_VAR, dir.as_str()),
        ]))
        .unwrap();
        assert_eq!(
            settings.logging,
            Some(LogSettings {
                level: default_log_level(),
                dir: dir.clone().into(),
            })
        );

        let settings = Settings::from_lookup(lookup_from(&[
            (DATABASE_URL_VAR, ":memory:"),
            (LOG_DIR_VAR, dir.as_str()),
            (LOG_LEVEL_VAR, " WARN "),
        ]))
        .unwrap();
        assert_eq!(settings.logging.unwrap().level, LevelFilter::Warn);
    }

    #[test]
    fn bad_log_level_is_rejected_when_logging_is_on() {
        let dir = absolute_log_dir();
        let err = Settings::from_lookup(lookup_from(&[
            (DATABASE_URL_VAR, ":memory:"),
            (LOG_DIR_VAR, dir.as_str()),
            (LOG_LEVEL_VAR, "verbose"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel { value, .. } if value == "verbose"));
    }

    #[test]
    fn log_dir_must_be_absolute() {
        let err = Settings::from_lookup(lookup_from(&[
            (DATABASE_URL_VAR, ":memory:"),
            (LOG_DIR_VAR, "logs/dev"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::RelativeLogDir { .. }));
    }
}
