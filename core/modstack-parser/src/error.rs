//! Error types for the parser.

use modstack_types::ClusterIndex;
use thiserror::Error;

/// Result type for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur while grouping items into clusters.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A parse pass created or destroyed primitives.
    #[error("parse changed the primitive multiset: {before} in, {after} out")]
    PrimitivesChanged { before: usize, after: usize },

    /// `set_members` on an initialized, non-dynamic cluster.
    #[error("cluster {0} is initialized and its members are fixed")]
    MembershipFrozen(ClusterIndex),

    /// Member count disagrees with a fixed pattern.
    #[error("cluster '{name}' expects {expected} members, got {found}")]
    MemberCountMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// A layer was handed a primitive, or a leaf cluster a sub-cluster.
    #[error("cluster '{name}' cannot hold member '{member}'")]
    InvalidMember { name: String, member: String },
}
