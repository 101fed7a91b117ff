//! Error types for catalog operations.

use thiserror::Error;

/// Catalog-specific errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A definition with this default name is already registered.
    #[error("cluster type already registered: {0}")]
    DuplicateName(String),

    /// The definition failed its sanity check.
    #[error("cluster type '{name}' is not sane: {reason}")]
    InsaneDefinition { name: String, reason: String },

    /// No definition with this name exists.
    #[error("cluster type not found: {0}")]
    NotFound(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
