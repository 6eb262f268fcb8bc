//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to
//! ~/Library/Logs/Stillscreen/app.log (override with `STILLSCREEN_LOG_DIR`)
//! and rotation on application startup keeping 10 historical files.

use crate::error::{Result, StillscreenError, StringError};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, EnvFilter};

/// Maximum number of historical log files to keep (app.log.1 through app.log.9)
const MAX_LOG_FILES: u8 = 9;

fn log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("STILLSCREEN_LOG_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join("Library/Logs/Stillscreen")
}

/// Initialize the logging system
///
/// Log level defaults to INFO but can be configured via the `RUST_LOG`
/// environment variable. Existing logs are rotated on startup so each
/// session's output is preserved separately.
pub fn init_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join("app.log");
    rotate_logs_on_startup(&log_path)?;

    // tracing_appender's rotation policies are time-based; session-based
    // retention is handled manually above, so the appender itself never
    // rotates.
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("app")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| StillscreenError::LoggingInitFailed(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false) // file output
        .with_target(true)
        .with_thread_ids(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| StillscreenError::LoggingInitFailed(Box::new(e)))?;

    tracing::info!("Stillscreen v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Rotate log files on application startup
///
/// app.log.9 is deleted, app.log.8 -> app.log.9 down to app.log.1 ->
/// app.log.2, then app.log -> app.log.1; the logger creates a fresh app.log.
/// Runs unconditionally on every startup regardless of file size.
fn rotate_logs_on_startup(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path.parent().ok_or_else(|| {
        StillscreenError::LoggingInitFailed(StringError::new("invalid log path"))
    })?;

    let log_name = log_path
        .file_name()
        .ok_or_else(|| {
            StillscreenError::LoggingInitFailed(StringError::new("invalid log filename"))
        })?
        .to_string_lossy();

    // Delete the oldest log file if it exists
    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    // Shift the numbered history up by one
    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        let next_log = log_dir.join(format!("{log_name}.{}", i + 1));

        if current_log.exists() {
            std::fs::rename(&current_log, &next_log)?;
        }
    }

    // Rotate the current log file
    let log_1 = log_dir.join(format!("{log_name}.1"));
    std::fs::rename(log_path, &log_1)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn create_test_log(path: &Path, content: &str) {
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_rotation_moves_current_log_aside() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("app.log");
        create_test_log(&log_path, "Session 1 log content");

        rotate_logs_on_startup(&log_path).unwrap();

        let log_1 = temp_dir.path().join("app.log.1");
        assert!(log_1.exists());
        assert!(!log_path.exists(), "a fresh app.log is created by the logger");
        assert_eq!(fs::read_to_string(&log_1).unwrap(), "Session 1 log content");
    }

    #[test]
    fn test_repeated_rotation_preserves_session_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("app.log");

        for i in 1..=5 {
            create_test_log(&log_path, &format!("Session {i} log content"));
            rotate_logs_on_startup(&log_path).unwrap();
        }

        for i in 1..=5 {
            let log_i = temp_dir.path().join(format!("app.log.{i}"));
            let expected_session = 6 - i; // most recent in .1, oldest in .5
            assert_eq!(
                fs::read_to_string(&log_i).unwrap(),
                format!("Session {expected_session} log content")
            );
        }
    }

    #[test]
    fn test_rotation_caps_the_history() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("app.log");

        for i in 1..=12 {
            create_test_log(&log_path, &format!("Session {i} log content"));
            rotate_logs_on_startup(&log_path).unwrap();
        }

        for i in 1..=MAX_LOG_FILES {
            assert!(temp_dir.path().join(format!("app.log.{i}")).exists());
        }
        assert!(!temp_dir.path().join("app.log.10").exists());

        // Oldest retained session is the 4th; sessions 1-3 aged out
        let log_9 = temp_dir.path().join(format!("app.log.{MAX_LOG_FILES}"));
        assert_eq!(
            fs::read_to_string(&log_9).unwrap(),
            "Session 4 log content"
        );
    }

    #[test]
    fn test_rotation_without_existing_log_is_a_noop() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("app.log");

        rotate_logs_on_startup(&log_path).unwrap();

        assert!(!log_path.exists());
        assert!(!temp_dir.path().join("app.log.1").exists());
    }
}
