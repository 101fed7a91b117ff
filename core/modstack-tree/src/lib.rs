//! The cluster tree of one object's modifier stack.
//!
//! [`ClusterTree`] keeps the parsed layout of a host stack and exposes the
//! operations a UI drives: navigation, selection, moves, removal, applying,
//! constructing and deconstructing clusters, and persistence. The host stack
//! itself sits behind [`ModifierHost`]; [`InMemoryHost`] is a complete
//! in-process implementation.

mod config;
mod error;
mod host;
mod selection;
mod tree;

pub use config::TreeConfig;
pub use error::{HostError, HostResult, TreeError, TreeResult};
pub use host::{InMemoryHost, ModifierHost};
pub use selection::{ItemId, Selection};
pub use tree::ClusterTree;
