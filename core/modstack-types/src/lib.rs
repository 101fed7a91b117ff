//! Core type definitions for modstack.
//!
//! This crate defines the vocabulary shared by every other modstack crate:
//! - [`Primitive`] — one entry of the host's modifier stack (name + type tag)
//! - [`Constraint`] — one slot of a cluster pattern (`ANY` or an allowed set)
//! - [`Availability`] — the matcher's verdict for a growing item sequence
//! - [`ClusterIndex`] / [`DefinitionIndex`] — monotonic identities
//! - [`Direction`] — stack movement direction for host calls
//!
//! Nothing here knows about parsing or persistence; those live in
//! `modstack-parser` and `modstack-state`.

mod availability;
mod constraint;
mod ids;
mod primitive;

pub use availability::{Availability, MemberView};
pub use constraint::Constraint;
pub use ids::{ClusterIndex, DefinitionIndex, IndexAllocator};
pub use primitive::{Direction, Primitive};

/// Marks a definition reconstructed from persisted state.
pub const TAG_RESTORED: &str = "RESTORED";

/// Marks a cluster whose members must keep their stack order when regrouped.
pub const TAG_NO_SORT: &str = "NO_SORT";

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid primitive description: {0}")]
    InvalidPrimitive(String),

    #[error("invalid cluster index: {0}")]
    InvalidIndex(String),
}
