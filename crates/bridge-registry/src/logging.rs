//! Logging setup for processes embedding the registry
//!
//! The registry only emits `tracing` events. Hosts that do not install their
//! own subscriber can call [`setup_logging`] once at startup.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::error::{RegistryError, RegistryResult};

/// Subscriber settings for a bridge process
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Baseline level; `RUST_LOG` directives are added on top
    pub level: Level,
    /// Emit one JSON object per line, for hosts that ship logs off-device
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Plain-text output at `level`
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Switch to JSON output
    pub fn json(mut self) -> Self {
        self.json = true;
        self
    }
}

/// Install a global `tracing` subscriber.
///
/// Fails with [`RegistryError::Configuration`] if one is already installed,
/// so a host that set up its own logging keeps it.
pub fn setup_logging(config: LoggingConfig) -> RegistryResult<()> {
    let filter = EnvFilter::from_default_env().add_directive(config.level.into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| RegistryError::config(format!("Cannot install subscriber: {}", e)))?;

    tracing::debug!(level = %config.level, json = config.json, "Logging initialized");
    Ok(())
}

/// Parse a log level name such as `"debug"` or `"WARN"`
pub fn parse_log_level(level: &str) -> RegistryResult<Level> {
    Level::from_str(level).map_err(|_| RegistryError::config(format!("Invalid log level: {}", level)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("WARN").unwrap(), Level::WARN);
        assert!(parse_log_level("loud").is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.json);

        let config = LoggingConfig::with_level(Level::TRACE).json();
        assert_eq!(config.level, Level::TRACE);
        assert!(config.json);
    }
}
