//! Core error types for dream-garage-core.
//!
//! Purchase failures are not errors: they are ordinary outcomes reported by
//! [`crate::ledger::PurchaseOutcome`]. The types here cover configuration,
//! seed data and input validation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dream-garage-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Seed data errors
    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Admin commands while the admin flag is off
    #[error("Admin commands are disabled (set admin.enabled = true)")]
    AdminDisabled,

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key not present in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Home/config directory could not be determined or created
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Seed data errors.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse seed file {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    #[error("Duplicate catalog item id: {0}")]
    DuplicateItem(String),

    #[error("Duplicate account id: {0}")]
    DuplicateAccount(String),

    #[error("Active account '{0}' is not in the roster")]
    UnknownActiveAccount(String),

    #[error("Seed roster is empty")]
    EmptyRoster,
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Item id not in the catalog
    #[error("Unknown catalog item: {0}")]
    UnknownItem(String),

    /// Account id not in the roster
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    /// Item exists but belongs to another category
    #[error("'{id}' is not a {expected}")]
    WrongCategory { id: String, expected: String },

    /// Item is already in the ownership set
    #[error("'{0}' is already owned")]
    AlreadyOwned(String),

    /// Selecting an item the session does not own
    #[error("'{0}' is locked (not owned)")]
    NotOwned(String),

    /// Unparseable view name
    #[error("Unknown view: {0}")]
    UnknownView(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_wraps_into_core_error() {
        let err: CoreError = ValidationError::NotOwned("cyber".into()).into();
        assert_eq!(err.to_string(), "Validation error: 'cyber' is locked (not owned)");
    }

    #[test]
    fn admin_disabled_message_names_the_flag() {
        assert!(CoreError::AdminDisabled.to_string().contains("admin.enabled"));
    }
}
