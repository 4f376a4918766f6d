//! Error types for cadence operations.
//!
//! This module provides the error hierarchy using `thiserror` for all
//! cadence operations including configuration, dispatch, and CLI commands.

use thiserror::Error;

/// Result type alias for cadence operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for cadence operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (invalid sizes, unknown strategies).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dispatch errors (transport and plan problems).
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Chunk size must allow at least one character per chunk.
    #[error("invalid chunk size: {size} (must be at least 1)")]
    InvalidChunkSize {
        /// The rejected chunk size.
        size: usize,
    },

    /// Unknown delivery strategy name.
    #[error("unknown delivery strategy: {name} (expected one of: natural, efficient, formal)")]
    UnknownStrategy {
        /// Name of the unknown strategy.
        name: String,
    },

    /// Configuration parse error (malformed JSON).
    #[error("config parse error: {0}")]
    Parse(String),
}

/// Dispatch-specific errors for sequenced delivery.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Chunk and pacing sequences in a plan must be the same length.
    #[error("plan mismatch: {chunks} chunks but {pacing} pacing entries")]
    PlanMismatch {
        /// Number of chunks in the plan.
        chunks: usize,
        /// Number of pacing entries in the plan.
        pacing: usize,
    },

    /// Transport rejected a text send; the delivery was aborted.
    #[error("sending chunk {index} failed: {source}")]
    Send {
        /// Index of the chunk whose send failed.
        index: usize,
        /// The transport's error, unmodified.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Missing required argument.
    #[error("missing required argument: {0}")]
    MissingArgument(String),

    /// Failed to read an input file or stream.
    #[error("failed to read {path}: {reason}")]
    ReadFailed {
        /// Path (or "stdin") that could not be read.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

// Implement From traits for common foreign errors

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
