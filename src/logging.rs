//! Tracing setup
//!
//! The interactive modes own the terminal, so their logs can only go to a
//! file. The headless simulator logs to stderr and keeps stdout for its
//! report.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Where log lines go
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

/// Install the global subscriber
///
/// `level` is an `EnvFilter` directive; `RUST_LOG`, when set, takes
/// precedence.
pub fn init(target: LogTarget<'_>, level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level: {level}"))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match target {
        LogTarget::Off => Ok(()),
        LogTarget::Stderr => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Failed to install log subscriber"),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))
                .context("Failed to install log subscriber")
        }
    }
}
