//! Shared logging setup for the MuscleMap binaries
//!
//! Diagnostics go to stderr; stdout carries only command output so the tools
//! compose in pipes.

use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log format
pub const FORMAT_ENV: &str = "MUSCLEMAP_LOG_FORMAT";

/// Environment variable selecting the minimum level
pub const LEVEL_ENV: &str = "MUSCLEMAP_LOG_LEVEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Plain lines, no colors
    #[default]
    Text,
    /// One JSON object per event
    Json,
    /// Multi-line with source locations
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(format!("Invalid log format: '{}'. Valid options: text, json, pretty", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
}

impl LoggingConfig {
    pub fn new(format: LogFormat, level: impl Into<String>) -> Self {
        Self {
            format,
            level: level.into(),
        }
    }

    /// Settings from `MUSCLEMAP_LOG_FORMAT` / `MUSCLEMAP_LOG_LEVEL`
    ///
    /// `--verbose` wins over the level variable. Unparseable formats fall
    /// back to text.
    pub fn from_env(verbose: bool) -> Self {
        let format = std::env::var(FORMAT_ENV)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let level = if verbose {
            "debug".to_string()
        } else {
            std::env::var(LEVEL_ENV).unwrap_or_else(|_| "warn".to_string())
        };
        Self::new(format, level)
    }

    /// Install the global subscriber; repeated calls are no-ops
    pub fn init(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        let installed = match self.format {
            LogFormat::Text => builder.with_target(false).with_ansi(false).try_init(),
            LogFormat::Json => builder.json().flatten_event(true).try_init(),
            LogFormat::Pretty => builder.pretty().with_file(true).with_line_number(true).try_init(),
        };

        if installed.is_err() {
            tracing::debug!("Logging already initialized");
        }
    }
}

/// Configure logging from the environment and install it
pub fn init_default(verbose: bool) {
    LoggingConfig::from_env(verbose).init();
}
