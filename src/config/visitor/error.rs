//! Visitor construction errors.

use thiserror::Error;

use crate::config::section::DecodeError;
use crate::config::validation::ValidationError;

/// Errors returned while building a visitor from a raw section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisitorConfError {
    /// The section has no `type` key, or it is empty.
    #[error("visitor [{name}] type shouldn't be empty")]
    MissingType { name: String },

    /// The `type` key names no registered visitor variant.
    #[error("visitor [{name}] type [{visitor_type}] error: unknown visitor type")]
    UnknownType { name: String, visitor_type: String },

    /// A field failed to decode from its raw value.
    #[error("visitor [{name}] type [{visitor_type}] error: {source}")]
    Config {
        name: String,
        visitor_type: String,
        #[source]
        source: DecodeError,
    },

    /// A decoded visitor broke an invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for visitor construction.
pub type VisitorConfResult<T> = Result<T, VisitorConfError>;
