//! Error types for URN parsing

use thiserror::Error;

use crate::EntityType;

/// Result type alias using UrnError
pub type Result<T> = std::result::Result<T, UrnError>;

/// Errors that can occur while parsing an SSIS URN
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrnError {
    /// The string does not follow the fixed layout for its entity kind
    #[error("URN '{urn}' does not match the {entity_type} pattern '{pattern}'")]
    PatternMismatch {
        urn: String,
        entity_type: EntityType,
        pattern: &'static str,
    },

    /// The string carries no SSIS entity prefix
    #[error("URN '{urn}' is not an SSIS entity URN")]
    UnknownEntityType { urn: String },
}

impl UrnError {
    pub(crate) fn mismatch(urn: &str, entity_type: EntityType) -> Self {
        Self::PatternMismatch {
            urn: urn.to_string(),
            entity_type,
            pattern: entity_type.pattern(),
        }
    }
}
