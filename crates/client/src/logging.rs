//! Log setup: stderr plus a log file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

/// Installs the global subscriber.
///
/// Logs go to stderr and to `speller.log` in `log_dir` (or the platform cache
/// directory). Keep the returned guard alive until exit so buffered lines are
/// flushed.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = log_dir.map(Path::to_path_buf).or_else(default_log_directory);
    let (file_layer, guard) = match &log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::never(dir, "speller.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = &log_dir {
        tracing::info!("Log file: {}/speller.log", dir.display());
    }

    Ok(guard)
}

/// Platform-specific log directory
fn default_log_directory() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "speller").map(|dirs| dirs.cache_dir().join("logs"))
}
