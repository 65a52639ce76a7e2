//! Error types for SSIS metadata mapping

use thiserror::Error;

use crate::emitter::EmitError;

/// Result type alias using MetadataError
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Errors that can occur while mapping and emitting SSIS metadata
#[derive(Debug, Error)]
pub enum MetadataError {
    /// A parent or entity reference did not follow its URN layout
    #[error("Malformed reference: {0}")]
    Urn(#[from] ssis_urn::UrnError),

    /// The transport failed to accept a proposal
    #[error("Emit failed: {0}")]
    Emit(#[from] EmitError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MetadataError {
    /// Create a configuration error with a message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
