//! # Logging
//!
//! The TUI owns stdout, so diagnostics go to a log file instead:
//! `<data dir>/convenio/logs/convenio.log` unless `--log-file` says otherwise.
//! Verbosity follows `RUST_LOG` and defaults to `info`.

use crate::ui::config::APP_NAME;
use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Where the log file goes when no path is given.
pub fn default_log_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Some(
        dirs.data_local_dir()
            .join("logs")
            .join(format!("{APP_NAME}.log")),
    )
}

/// Filter from `RUST_LOG`, or [`DEFAULT_FILTER`] when unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Open `path` for appending, creating parent directories.
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

/// Install the global subscriber writing to `path` (or the default path).
///
/// Returns the file being written. Fails if no path can be determined, the
/// file cannot be opened, or a subscriber is already installed; the kiosk
/// keeps running without logs in that case.
pub fn init(path: Option<&Path>) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_log_path().context("Could not determine data directory")?,
    };
    let file = open_log_file(&path)?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("nested").join("logs").join("k.log");

        open_log_file(&path).expect("open");
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_appends() {
        use std::io::Write;

        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("k.log");

        writeln!(open_log_file(&path).expect("open"), "first").expect("write");
        writeln!(open_log_file(&path).expect("open"), "second").expect("write");

        let contents = fs::read_to_string(&path).expect("read");
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn test_default_log_path_ends_with_app_log() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("logs/convenio.log"));
        }
    }
}
