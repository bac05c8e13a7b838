//! Error types for tool routing and execution.
//!
//! This module defines every failure mode of the router, from argument
//! validation at the dispatcher boundary down to subprocess and network
//! failures in the adapters. All errors use `thiserror`; the dispatcher turns
//! any of them into an `"Error: <message>"` tool result.

use std::path::PathBuf;
use thiserror::Error;

/// Error types for ZetaChain tool routing.
///
/// Each variant represents a specific failure mode with relevant context,
/// so callers can match on the kind while users still get a readable message.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ZetaError {
    // Dispatcher errors
    /// Tool name is not in the catalog.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// A required argument (or one of a set of alternatives) is absent.
    #[error("missing required argument: {0}")]
    MissingArgument(String),

    /// An argument is present but has the wrong type or value.
    #[error("invalid argument '{field}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        field: String,
        /// What was wrong with it.
        reason: String,
    },

    // API adapter errors
    /// The verb has no direct network API implementation.
    #[error("'{0}' is not available through the network API")]
    UnsupportedOperation(String),

    /// Network request failed (connection, timeout, non-success status).
    #[error("network request failed: {0}")]
    Transport(String),

    /// JSON-RPC endpoint answered with an error object.
    #[error("rpc error: {0}")]
    Rpc(String),

    /// Response could not be interpreted.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Network name is not configured.
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    // CLI adapter errors
    /// The CLI process could not be created.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// Program that was being started.
        program: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The CLI process exited with a non-zero status.
    #[error("command exited with code {code}: {stderr}")]
    NonZeroExit {
        /// Exit code (-1 when terminated by a signal).
        code: i32,
        /// Captured standard error.
        stderr: String,
    },

    /// The CLI process did not finish within the configured timeout.
    #[error("command timed out after {0}s")]
    CliTimeout(u64),

    /// No CLI executor was resolved for this process.
    #[error("no zetachain CLI installation is available")]
    CliUnavailable,

    // Config errors
    /// Invalid configuration detected.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Error parsing configuration file.
    #[error("config parse error: {0}")]
    ConfigParseError(String),

    /// Configuration file not found at the expected location.
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    // IO and system errors
    /// Standard IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context from anyhow.
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl ZetaError {
    /// Shorthand for [`ZetaError::InvalidArgument`].
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for failures that a static fallback payload may replace.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Rpc(_) | Self::MalformedResponse(_)
        )
    }
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, ZetaError>;
