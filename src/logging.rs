//! Log setup for the binary.
//!
//! The terminal belongs to the UI, so logs go to a file or nowhere.

use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber writing to `config.log_file`.
///
/// Returns `Ok(false)` without installing anything when no log file is
/// configured. An invalid filter falls back to `info`.
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = config.log_file.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_installs_nothing() {
        let installed = init(&Config::default()).expect("no-op init cannot fail");
        assert!(!installed);
    }

    #[test]
    fn test_unwritable_log_file_is_an_error() {
        let config = Config::default().with_log_file("/nonexistent-dir/for/sure/todo.log");
        assert!(init(&config).is_err());
    }
}
