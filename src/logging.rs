//! Diagnostic logging setup
//!
//! Log lines go to `fintrack.log` in the base directory, never to the
//! terminal, so report output stays clean. `RUST_LOG` overrides the
//! configured level.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{FinTrackError, FinTrackResult};

/// Log file name inside the base directory
pub const LOG_FILE_NAME: &str = "fintrack.log";

/// Level used when the configured one cannot be parsed
pub const FALLBACK_LEVEL: &str = "info";

/// Filter directive used when `RUST_LOG` is unset
pub fn default_directive(level: &str) -> String {
    format!("fintrack={}", level.trim().to_lowercase())
}

/// Check a configured log level, returning its normalized form
pub fn parse_level(level: &str) -> FinTrackResult<String> {
    let normalized = level.trim().to_lowercase();
    normalized.parse::<LevelFilter>().map_err(|_| {
        FinTrackError::Config(format!(
            "Invalid log level '{}'. Valid levels: off, error, warn, info, debug, trace",
            level.trim()
        ))
    })?;
    Ok(normalized)
}

/// Install the global tracing subscriber, appending to `<dir>/fintrack.log`
///
/// An unparseable `level` falls back to [`FALLBACK_LEVEL`] with a warning in
/// the log, so a bad setting never stops the `config` command that fixes it.
/// Calling this twice in one process is harmless: the second subscriber is
/// rejected and the first keeps running.
pub fn init_logging(dir: &Path, level: &str) -> FinTrackResult<()> {
    fs::create_dir_all(dir)?;
    let log_path = dir.join(LOG_FILE_NAME);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| FinTrackError::Io(format!("Failed to open log file: {}", e)))?;

    let rejected = parse_level(level).is_err();
    let level = if rejected { FALLBACK_LEVEL } else { level };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(level)))
        .map_err(|e| FinTrackError::Config(format!("Invalid log level '{}': {}", level, e)))?;

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(log_path = %log_path.display(), "logging initialized");
        if rejected {
            tracing::warn!(fallback = FALLBACK_LEVEL, "configured log level is invalid");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("info"), "fintrack=info");
        assert_eq!(default_directive(" DEBUG "), "fintrack=debug");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(" Debug ").unwrap(), "debug");
        assert_eq!(parse_level("off").unwrap(), "off");
        assert!(matches!(parse_level("bogus"), Err(FinTrackError::Config(_))));
    }

    #[test]
    fn test_init_falls_back_on_bad_level() {
        let temp_dir = TempDir::new().unwrap();

        init_logging(temp_dir.path(), "bogus").unwrap();

        assert!(temp_dir.path().join(LOG_FILE_NAME).exists());
    }

    #[test]
    fn test_init_creates_log_file() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("logs");

        init_logging(&dir, "debug").unwrap();
        init_logging(&dir, "debug").unwrap();

        assert!(dir.join(LOG_FILE_NAME).exists());
    }
}
