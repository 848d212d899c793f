//! Registry configuration
//!
//! The process-wide registry is created lazily, so its configuration is read
//! from the environment at first access. Embedders that build their own
//! [`SessionRegistry`](crate::SessionRegistry) pass a config explicitly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// Environment variable naming a TOML file with registry settings
pub const CONFIG_ENV_VAR: &str = "RVOIP_REGISTRY_CONFIG";

/// Default size at which a mapping reports unusual growth
pub const DEFAULT_GROWTH_WARNING_THRESHOLD: usize = 1024;

/// Settings for a [`SessionRegistry`](crate::SessionRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Entry count per mapping at which a growth warning is logged. Sizes are
    /// sampled after each insert, so under concurrent inserts a multiple can
    /// be reported twice or skipped. Zero disables the warning.
    pub growth_warning_threshold: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            growth_warning_threshold: DEFAULT_GROWTH_WARNING_THRESHOLD,
        }
    }
}

impl RegistryConfig {
    /// Set the growth warning threshold
    pub fn with_growth_warning_threshold(mut self, threshold: usize) -> Self {
        self.growth_warning_threshold = threshold;
        self
    }

    /// Parse a TOML document
    pub fn from_toml_str(source: &str) -> RegistryResult<Self> {
        toml::from_str(source)
            .map_err(|e| RegistryError::config(format!("Invalid registry config: {}", e)))
    }

    /// Load a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            RegistryError::config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }

    /// Configuration for the process-wide registry.
    ///
    /// Reads the file named by [`CONFIG_ENV_VAR`] when set. A missing or
    /// invalid file falls back to defaults; the registry must always come up.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(config) => {
                tracing::info!("Loaded registry config from {}", path);
                config
            }
            Err(e) => {
                tracing::warn!("{}; falling back to default registry config", e);
                Self::default()
            }
        }
    }
}
