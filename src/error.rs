//! Error types for kubeshell operations.
//!
//! This module defines [`KubeshellError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Missing settings are not errors; the affected tool is skipped
//! - Helper-tool problems surface as a [`DockerEnvOutcome`](crate::environment::DockerEnvOutcome), never as an error
//! - A command that could not be started is [`KubeshellError::SpawnFailed`],
//!   distinct from a command that ran and exited non-zero

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for kubeshell operations.
#[derive(Debug, Error)]
pub enum KubeshellError {
    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The command could not be started at all.
    #[error("Failed to start command '{command}': {message}")]
    SpawnFailed { command: String, message: String },

    /// Unrecognized platform name given on the command line.
    #[error("Unknown platform: {name}")]
    UnknownPlatform { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KubeshellError {
    /// Build a [`KubeshellError::SpawnFailed`] from an IO error.
    pub fn spawn_failed(command: impl Into<String>, err: &std::io::Error) -> Self {
        Self::SpawnFailed {
            command: command.into(),
            message: err.to_string(),
        }
    }

    /// Whether this error means the command never started.
    pub fn is_spawn_failure(&self) -> bool {
        matches!(self, Self::SpawnFailed { .. })
    }
}

/// Result type alias for kubeshell operations.
pub type Result<T> = std::result::Result<T, KubeshellError>;
