//! Tracing subscriber setup for the binary.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "VIGNETTE_LOG";

/// Filter from [`LOG_ENV`] if set and valid, otherwise from `level`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber.
///
/// With a `file` logs are appended there (the interactive player owns the
/// terminal); otherwise they go to stderr.
pub fn init(level: &str, file: Option<&Path>) -> Result<()> {
    let filter = build_filter(level);
    let builder = fmt().with_env_filter(filter).with_target(true);

    match file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        None => {
            builder
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
    }
    Ok(())
}
