//! Error types for tree operations and host calls.

use crate::ItemId;
use modstack_catalog::CatalogError;
use modstack_parser::ParseError;
use modstack_state::StateError;
use modstack_types::Direction;
use thiserror::Error;

/// Result type for host calls.
pub type HostResult<T> = Result<T, HostError>;

/// Errors reported by a [`ModifierHost`](crate::ModifierHost).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// No primitive with this name.
    #[error("primitive not found: {0}")]
    NotFound(String),

    /// The primitive cannot move further in this direction.
    #[error("primitive '{name}' cannot move {direction:?}")]
    AtBoundary { name: String, direction: Direction },

    /// The host declined the call.
    #[error("host refused operation on '{0}'")]
    Refused(String),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors that can occur in tree operations.
///
/// On any error the tree is left as it was before the call, except for
/// [`TreeError::OutOfSync`] and host failures, after which the tree has been
/// rebuilt from the live stack.
#[derive(Debug, Error)]
pub enum TreeError {
    /// No item with this id in the tree.
    #[error("item not found: {0}")]
    NotFound(ItemId),

    /// The operation needs a cluster.
    #[error("not a cluster: {0}")]
    NotACluster(ItemId),

    /// The item is already first or last among its siblings.
    #[error("{0} cannot move further")]
    AtBoundary(ItemId),

    /// Nothing to construct from.
    #[error("selection is empty")]
    EmptySelection,

    /// The selected items cannot be grouped together.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// The operation would leave the tree as it is.
    #[error("nothing changed: {0}")]
    NoChange(String),

    /// No catalog type with this name.
    #[error("unknown cluster type: {0}")]
    UnknownDefinition(String),

    /// The catalog type cannot be instantiated from scratch.
    #[error("cluster type '{0}' cannot be created")]
    NotCreatable(String),

    /// The host object carries no persisted layout.
    #[error("no saved state on this object")]
    NoState,

    /// Tree and host stack disagreed after an operation.
    #[error("tree out of sync with the stack: tree has {expected} primitives, stack has {found}")]
    OutOfSync { expected: usize, found: usize },

    /// Host call failed.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// Parse error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// State error.
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// Catalog error.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
