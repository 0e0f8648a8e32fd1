//! File logging. The terminal belongs to the UI while the app runs, so
//! tracing output goes to a timestamped file instead.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Generate a timestamped log file path
pub fn create_log_file_path(logs_dir: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    logs_dir.join(format!("project_board-{}.log", timestamp))
}

/// Install the global subscriber writing to a new file under `logs_dir`.
///
/// Returns the path of the file being written.
pub fn init_file_logging(logs_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(logs_dir).context("Failed to create logs directory")?;

    let log_path = create_log_file_path(logs_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context("Failed to open log file")?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "project_board=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_name() {
        let path = create_log_file_path(Path::new("/var/log/pb"));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(path.starts_with("/var/log/pb"));
        assert!(name.starts_with("project_board-"));
        assert!(name.ends_with(".log"));
        // project_board-YYYY-MM-DD_HH-MM-SS.log
        assert_eq!(name.len(), "project_board-".len() + 19 + ".log".len());
    }

    #[test]
    fn init_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("nested").join("logs");

        let path = init_file_logging(&logs).unwrap();
        tracing::info!("hello");

        assert!(logs.is_dir());
        assert!(path.exists());
    }
}
