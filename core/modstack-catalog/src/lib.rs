//! Cluster type catalog for modstack.
//!
//! Defines the templates the parser recognizes:
//! - [`ClusterTypeDefinition`] — an immutable pattern (type + name slots),
//!   priority and behavior flags
//! - [`Catalog`] — registration, sanity checking and lookup of definitions,
//!   split into leaf cluster types and layer types
//! - [`ExtraCheck`] — optional hook for checks a pattern cannot express
//!
//! Definitions are shared as `Arc<ClusterTypeDefinition>` handles so trial
//! matching never clones them.

mod catalog;
mod check;
mod defaults;
mod definition;
mod error;

pub use catalog::{Catalog, CatalogFile};
pub use check::{ExtraCheck, SharedTypeCheck};
pub use defaults::default_definitions;
pub use definition::ClusterTypeDefinition;
pub use error::{CatalogError, CatalogResult};
