//! Error handling for the restgate runtime.
//!
//! One error type covers the whole library; binaries wrap it in `anyhow` at
//! the edge. Validation and body-path variants carry the exact message that
//! is surfaced to the MCP caller, so their `Display` is the bare message.

use thiserror::Error;

/// Result type for restgate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the tool-binding runtime
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing base URL, bad env value). Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// Descriptor invariant violation detected at registration time
    #[error("descriptor error: {0}")]
    Descriptor(String),

    /// Argument validation failure; reported to the caller, no HTTP call issued
    #[error("{0}")]
    Validation(String),

    /// Ill-formed or conflicting nested-body path
    #[error("{0}")]
    BodyPath(String),

    /// MCP transport failure while serving
    #[error("transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new descriptor error
    pub fn descriptor<S: Into<String>>(msg: S) -> Self {
        Self::Descriptor(msg.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new body-path error
    pub fn body_path<S: Into<String>>(msg: S) -> Self {
        Self::BodyPath(msg.into())
    }
}
