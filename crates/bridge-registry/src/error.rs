//! Error types for the bridge registry
//!
//! Registry lookups and removals never fail: a missing identifier is a normal
//! outcome and is reported as `None`. The errors below only surface at the
//! edges of the crate, where identifiers are validated, bridge events are
//! decoded and configuration is loaded.

use thiserror::Error;

/// Result type for bridge registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur at the registry boundary
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Identifier rejected before reaching a mapping
    #[error("Invalid identifier {id:?}: {reason}")]
    InvalidIdentifier {
        /// Identifier as received
        id: String,
        /// Why it was rejected
        reason: String,
    },

    /// Classification tag outside the known set
    #[error("Unknown event type: {value}")]
    UnknownEventType {
        /// Raw tag value
        value: u8,
    },

    /// Bridge payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// What went wrong
        message: String,
    },
}

impl RegistryError {
    /// Create an invalid identifier error
    pub fn invalid_id(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Check an identifier before it is handed to a mapping.
///
/// The registry itself accepts any string; command handlers call this first
/// so that malformed requests from the host are rejected at the bridge.
pub fn validate_id(id: &str) -> RegistryResult<&str> {
    if id.is_empty() {
        return Err(RegistryError::invalid_id(id, "identifier is empty"));
    }
    if id.trim().is_empty() {
        return Err(RegistryError::invalid_id(id, "identifier is blank"));
    }
    Ok(id)
}
