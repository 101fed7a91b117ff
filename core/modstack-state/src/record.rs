//! The persisted record format.

use crate::{StateError, StateResult};
use modstack_types::Primitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Version written by this build. Anything else is treated as no state.
pub const FORMAT_VERSION: u32 = 1;

/// Whether a recorded cluster grouped clusters or primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Layer,
    Cluster,
}

/// A primitive at its position in the flattened stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveRecord {
    pub index: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
}

impl PrimitiveRecord {
    #[must_use]
    pub fn to_primitive(&self) -> Primitive {
        Primitive::new(self.name.clone(), self.type_tag.clone())
    }
}

/// One recorded cluster and, recursively, its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRecord {
    /// Flattened position of the cluster's first primitive.
    pub serial_index: usize,
    pub default_name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    /// The name the cluster reported when saved.
    pub display_name: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    pub members: Vec<StateEntry>,
    pub kind: RecordKind,
}

impl ClusterRecord {
    /// Names the members reported when saved, one per member.
    #[must_use]
    pub fn member_names(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|m| m.name().to_string())
            .collect()
    }

    /// First primitive name of each member, in order.
    #[must_use]
    pub fn member_anchors(&self) -> Vec<String> {
        self.members
            .iter()
            .filter_map(|m| m.first_primitive_name().map(str::to_string))
            .collect()
    }
}

/// A top-level or member entry of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entry", rename_all = "snake_case")]
pub enum StateEntry {
    Primitive(PrimitiveRecord),
    Cluster(ClusterRecord),
}

impl StateEntry {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(p) => &p.name,
            Self::Cluster(c) => &c.display_name,
        }
    }

    /// Name of the topmost primitive under this entry.
    #[must_use]
    pub fn first_primitive_name(&self) -> Option<&str> {
        match self {
            Self::Primitive(p) => Some(&p.name),
            Self::Cluster(c) => c.members.first().and_then(Self::first_primitive_name),
        }
    }

    fn collect_primitives(&self, out: &mut Vec<Primitive>) {
        match self {
            Self::Primitive(p) => out.push(p.to_primitive()),
            Self::Cluster(c) => {
                for member in &c.members {
                    member.collect_primitives(out);
                }
            }
        }
    }

    fn collect_clusters<'a>(&'a self, out: &mut Vec<&'a ClusterRecord>) {
        if let Self::Cluster(c) = self {
            out.push(c);
            for member in &c.members {
                member.collect_clusters(out);
            }
        }
    }
}

#[derive(Deserialize)]
struct VersionHeader {
    #[serde(default)]
    version: u32,
}

/// The versioned envelope stored on the host object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub version: u32,
    pub entries: Vec<StateEntry>,
}

impl PersistedState {
    #[must_use]
    pub fn new(entries: Vec<StateEntry>) -> Self {
        Self {
            version: FORMAT_VERSION,
            entries,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The recorded stack, flattened in order.
    #[must_use]
    pub fn primitives(&self) -> Vec<Primitive> {
        let mut out = Vec::new();
        for entry in &self.entries {
            entry.collect_primitives(&mut out);
        }
        out
    }

    /// Every recorded cluster, depth-first in stack order.
    #[must_use]
    pub fn cluster_records(&self) -> Vec<&ClusterRecord> {
        let mut out = Vec::new();
        for entry in &self.entries {
            entry.collect_clusters(&mut out);
        }
        out
    }

    /// Names of primitives recorded outside any cluster.
    #[must_use]
    pub fn bare_names(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                StateEntry::Primitive(p) => Some(p.name.clone()),
                StateEntry::Cluster(_) => None,
            })
            .collect()
    }

    pub fn to_json(&self) -> StateResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a stored record, refusing versions other than [`FORMAT_VERSION`].
    pub fn from_json(json: &str) -> StateResult<Self> {
        let header: VersionHeader = serde_json::from_str(json)?;
        if header.version != FORMAT_VERSION {
            return Err(StateError::UnsupportedVersion(header.version));
        }
        Ok(serde_json::from_str(json)?)
    }
}
