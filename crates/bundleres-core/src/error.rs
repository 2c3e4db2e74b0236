//! Error types for bundleres

use std::path::PathBuf;
use thiserror::Error;

use bundleres_stores::ResolveError;

/// Result type alias using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that end a run.
///
/// Per-line resolution failures are not in here; they are reported on the
/// diagnostic stream and processing continues.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input, output or diagnostic stream failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Store setup failure (HTTP client construction)
    #[error("store setup failed: {0}")]
    Store(#[from] ResolveError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Field name outside the allowed set
    #[error("unknown field {name:?} (allowed: {allowed})")]
    UnknownField { name: String, allowed: String },

    /// Field list had no usable entries
    #[error("no valid fields specified")]
    NoFields,

    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Whether this error comes from configuration rather than the streams
    pub fn is_config(&self) -> bool {
        matches!(self, CoreError::Config(_))
    }
}
