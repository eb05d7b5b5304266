//! Core error types for modeshift-core.
//!
//! This module defines the error hierarchy using thiserror. Profile errors are
//! local, recoverable conditions reported to the caller; none of them is fatal
//! to the lifecycle engine.

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::ModeId;

/// Core error type for modeshift-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Profile mutation errors
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Catalog validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The lifecycle controller needs an async runtime to schedule ticks
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors produced by the mutation API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// Zero (or negative) duration passed to enable/toggle/extend
    #[error("Invalid duration: {seconds}s (must be positive)")]
    InvalidDuration { seconds: i64 },

    /// Extend on a disabled profile
    #[error("Profile '{mode_id}' is not active")]
    NotActive { mode_id: ModeId },

    /// Operation on a mode that is not in the catalog
    #[error("Unknown mode: '{mode_id}'")]
    UnknownMode { mode_id: ModeId },

    /// A stored record violates the profile invariants
    #[error("Inconsistent state for '{mode_id}': {message}")]
    Inconsistent { mode_id: ModeId, message: String },
}

/// Catalog validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Catalog has no modes
    #[error("Mode catalog is empty")]
    EmptyCatalog,

    /// A mode has an empty identifier
    #[error("Mode at position {index} has an empty id")]
    EmptyModeId { index: usize },

    /// Two catalog entries share an identifier
    #[error("Duplicate mode id: '{0}'")]
    DuplicateMode(ModeId),
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

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
