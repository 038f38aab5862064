//! Core error types for cinerank.
//!
//! This module defines the central error type shared across the pipeline.
//! Each stage reports through its own variant so the binary can tell a
//! transport failure from a layout change or a broken contract.

use thiserror::Error;

/// Central error type for all cinerank operations.
#[derive(Error, Debug)]
pub enum CinerankError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transport failure reaching the listing or an award page
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Expected structural element missing from a retrieved page
    #[error("parse error: {0}")]
    Parse(String),

    /// Schema contract violated by a batch or an identifier
    #[error("validation error: {0}")]
    Validation(String),

    /// Output document could not be produced
    #[error("output error: {0}")]
    Output(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `CinerankError`.
pub type Result<T> = std::result::Result<T, CinerankError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
