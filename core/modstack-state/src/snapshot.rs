//! Lightweight record of the primitive stack for change detection.

use crate::StateResult;
use modstack_types::Primitive;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub index: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
}

/// Index, name and type of every primitive at the time of capture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackSnapshot {
    entries: Vec<SnapshotEntry>,
}

impl StackSnapshot {
    #[must_use]
    pub fn capture(primitives: &[Primitive]) -> Self {
        let entries = primitives
            .iter()
            .enumerate()
            .map(|(index, p)| SnapshotEntry {
                index,
                name: p.name.clone(),
                type_tag: p.type_tag.clone(),
            })
            .collect();
        Self { entries }
    }

    /// Returns true if `live` is not the captured stack.
    #[must_use]
    pub fn differs_from(&self, live: &[Primitive]) -> bool {
        self.entries.len() != live.len()
            || self
                .entries
                .iter()
                .zip(live)
                .any(|(e, p)| e.name != p.name || e.type_tag != p.type_tag)
    }

    #[must_use]
    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> StateResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> StateResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
