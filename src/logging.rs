//! File-backed `tracing` subscriber for the binary. The terminal belongs to
//! the UI, so log lines go to `Config::log_path` instead of stderr.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};

use crate::config::Config;

/// Install the global subscriber. Call once, before the first span or event.
pub fn init(config: &Config) -> Result<()> {
    if let Some(parent) = config.log_path.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("failed to open log file {}", config.log_path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.log_level)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}
