//! Identifier types used throughout the modstack core.
//!
//! Both identities are monotonic counters rather than random ids: creation
//! order is meaningful (it breaks ties and keeps identity stable across
//! reparses within one session).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Creation-order identity of an instantiated cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterIndex(u64);

impl ClusterIndex {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClusterIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for ClusterIndex {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| crate::Error::InvalidIndex(s.to_string()))
    }
}

/// Catalog-scoped registration index of a cluster type definition.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DefinitionIndex(u64);

impl DefinitionIndex {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DefinitionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out strictly increasing indices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexAllocator {
    next: u64,
}

impl IndexAllocator {
    /// Creates an allocator whose first index is 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Next cluster identity.
    pub fn next_cluster(&mut self) -> ClusterIndex {
        ClusterIndex(self.bump())
    }

    /// Next definition identity.
    pub fn next_definition(&mut self) -> DefinitionIndex {
        DefinitionIndex(self.bump())
    }

    /// Value the next call will hand out.
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.next.max(1)
    }

    fn bump(&mut self) -> u64 {
        let value = self.next.max(1);
        self.next = value + 1;
        value
    }
}
