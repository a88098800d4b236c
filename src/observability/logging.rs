//! # Logging
//!
//! Tracing subscriber setup. `RUST_LOG` takes precedence over `--log-level`.

use std::env::VarError;

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::constants::DEFAULT_LOG_LEVEL;

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Logging switches bound alongside the controller options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingOptions {
    /// Filter directive, e.g. `info` or `cert_manager_controller=debug`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Build the event filter from `RUST_LOG`, falling back to `level` when it is unset.
pub fn env_filter(level: &str) -> Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => filter_from(Some(&directives), level),
        Err(VarError::NotPresent) => filter_from(None, level),
        Err(e) => Err(anyhow!("Invalid {}: {e}", EnvFilter::DEFAULT_ENV)),
    }
}

/// An empty `RUST_LOG` counts as unset; a malformed one is an error.
fn filter_from(env_directives: Option<&str>, level: &str) -> Result<EnvFilter> {
    match env_directives.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| anyhow!("Invalid {} '{directives}': {e}", EnvFilter::DEFAULT_ENV)),
        None => EnvFilter::try_new(level)
            .map_err(|e| anyhow!("Invalid log level '{level}': {e}")),
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(options: &LoggingOptions) -> Result<()> {
    let filter = env_filter(&options.level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match options.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow!("Failed to initialize tracing subscriber: {e}"))
}
