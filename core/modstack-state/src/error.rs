//! Error types for state persistence.

use modstack_parser::ParseError;
use thiserror::Error;

/// Result type for state operations.
pub type StateResult<T> = Result<T, StateError>;

/// Errors that can occur while saving or restoring state.
#[derive(Debug, Error)]
pub enum StateError {
    /// The record was written by a format this build does not read.
    #[error("unsupported state format version {0}")]
    UnsupportedVersion(u32),

    /// A recorded cluster type is no longer in the catalog.
    #[error("cluster type not in catalog: {0}")]
    UnknownDefinition(String),

    /// A recorded cluster and its catalog type disagree on layer-ness.
    #[error("cluster type '{0}' changed between layer and leaf")]
    KindMismatch(String),

    /// The recorded member count no longer fits the catalog type's pattern.
    #[error("cluster type '{name}' now has {expected} slots, record has {found} members")]
    MemberCountMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Parsing during restoration failed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
