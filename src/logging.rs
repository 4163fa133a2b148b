use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "wc_winners.log";

/// Routes tracing output to a daily-rolling file; the terminal belongs to the UI.
///
/// The returned guard must live until shutdown so buffered lines are flushed.
pub fn init_file_logging(dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("install tracing subscriber: {err}"))?;
    Ok(guard)
}
