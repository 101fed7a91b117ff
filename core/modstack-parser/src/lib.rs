//! Cluster recognition for modstack.
//!
//! Takes a flat, ordered sequence of primitives and a catalog of cluster
//! types and partitions the sequence into clusters:
//!
//! - [`check_availability`] — one definition vs. a growing sequence
//!   (match / need more / reject)
//! - [`ClusterParser::parse`] — one greedy pass with priority tie-breaking
//! - [`ClusterParser::parse_recursively`] — repeated passes that build layers
//!   (clusters of clusters) until the grouping settles
//! - [`ClusterParser::parse_object`] — both of the above for a whole stack
//!
//! Every pass checks that it neither created nor lost a primitive.

mod cluster;
mod config;
mod diagnostics;
mod error;
mod item;
mod matcher;
mod parser;
mod select;

pub use cluster::{Cluster, HasMembers, ParsedLayer};
pub use config::ParserConfig;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{ParseError, ParseResult};
pub use item::{Item, bare_items, flatten, primitive_multiset};
pub use matcher::check_availability;
pub use parser::{
    Candidates, ClusterParser, LayeringOutcome, ObjectParse, ParseOutcome, ParseStep,
};
pub use select::select_winner;
