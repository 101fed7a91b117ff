//! Saving a tree to a record and turning a record back into definitions.

use crate::{
    ClusterRecord, FORMAT_VERSION, PersistedState, PrimitiveRecord, RecordKind, StateEntry,
    StateError, StateResult,
};
use modstack_catalog::{Catalog, ClusterTypeDefinition};
use modstack_parser::{HasMembers, Item};
use modstack_types::{DefinitionIndex, Primitive};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Records `items` (normally the outermost layer) in stack order.
#[must_use]
pub fn save(items: &[Item]) -> PersistedState {
    let mut next = 0;
    let entries = items.iter().map(|i| record_item(i, &mut next)).collect();
    PersistedState::new(entries)
}

fn record_item(item: &Item, next: &mut usize) -> StateEntry {
    match item {
        Item::Primitive(p) => {
            let record = PrimitiveRecord {
                index: *next,
                name: p.name.clone(),
                type_tag: p.type_tag.clone(),
            };
            *next += 1;
            StateEntry::Primitive(record)
        }
        Item::Cluster(c) => {
            let serial_index = *next;
            let members = c.members().iter().map(|m| record_item(m, next)).collect();
            StateEntry::Cluster(ClusterRecord {
                serial_index,
                default_name: c.definition().default_name.clone(),
                type_tag: c.definition().type_tag.clone(),
                custom_name: c.custom_name().map(str::to_string),
                display_name: c.name().to_string(),
                tags: c.custom_tags().clone(),
                members,
                kind: if c.is_layer() {
                    RecordKind::Layer
                } else {
                    RecordKind::Cluster
                },
            })
        }
    }
}

/// A record that could not be turned back into a definition.
#[derive(Debug)]
pub struct RejectedRecord {
    pub default_name: String,
    pub display_name: String,
    pub error: StateError,
}

/// Definitions reconstructed from a record, ready to hand to the parser.
#[derive(Debug, Default)]
pub struct Restoration {
    /// Restored leaf shapes, one per recorded leaf cluster.
    pub leaf_definitions: Vec<Arc<ClusterTypeDefinition>>,
    /// Restored layer shapes, one per recorded layer.
    pub layer_definitions: Vec<Arc<ClusterTypeDefinition>>,
    /// Custom tags to put back on instances of each restored definition.
    pub custom_tags: BTreeMap<DefinitionIndex, BTreeSet<String>>,
    pub rejected: Vec<RejectedRecord>,
    /// Primitives recorded outside any cluster.
    pub bare: BTreeSet<String>,
    /// The live stack is not the recorded one.
    pub stack_changed: bool,
}

impl Restoration {
    #[must_use]
    pub fn restored_count(&self) -> usize {
        self.leaf_definitions.len() + self.layer_definitions.len()
    }
}

/// Rebuilds restored definitions for every recorded cluster.
///
/// Each recorded cluster yields a copy of its catalog type bound to the
/// recorded members (by display name and by first primitive) and custom name, tagged `RESTORED` and given a fresh
/// index. A record whose type is gone or no longer fits its members is
/// rejected on its own; the rest still restore. A live stack that differs
/// from the recorded one is not an error: shapes whose primitives are still
/// in place match again, everything else is parsed afresh.
pub fn load(
    state: &PersistedState,
    catalog: &Catalog,
    live: &[Primitive],
) -> StateResult<Restoration> {
    if state.version != FORMAT_VERSION {
        return Err(StateError::UnsupportedVersion(state.version));
    }

    let recorded = state.primitives();
    let stack_changed = recorded != live;
    if stack_changed {
        warn!(
            recorded = recorded.len(),
            live = live.len(),
            "stack changed since the state was saved"
        );
    }

    let mut restoration = Restoration {
        bare: state.bare_names(),
        stack_changed,
        ..Restoration::default()
    };
    let mut next_index = catalog
        .iter()
        .map(|d| d.index.value())
        .max()
        .unwrap_or(0)
        + 1;

    for record in state.cluster_records() {
        match restore_definition(record, catalog) {
            Ok(mut definition) => {
                definition.index = DefinitionIndex::new(next_index);
                next_index += 1;
                debug!(
                    cluster = %record.display_name,
                    kind = ?record.kind,
                    index = %definition.index,
                    "restored cluster type"
                );
                if !record.tags.is_empty() {
                    restoration
                        .custom_tags
                        .insert(definition.index, record.tags.clone());
                }
                let definition = Arc::new(definition);
                if definition.is_layer {
                    restoration.layer_definitions.push(definition);
                } else {
                    restoration.leaf_definitions.push(definition);
                }
            }
            Err(error) => {
                warn!(
                    cluster = %record.display_name,
                    error = %error,
                    "abandoning restoration of recorded cluster"
                );
                restoration.rejected.push(RejectedRecord {
                    default_name: record.default_name.clone(),
                    display_name: record.display_name.clone(),
                    error,
                });
            }
        }
    }
    Ok(restoration)
}

fn restore_definition(
    record: &ClusterRecord,
    catalog: &Catalog,
) -> StateResult<ClusterTypeDefinition> {
    let base = catalog
        .lookup_by_name(&record.default_name)
        .ok_or_else(|| StateError::UnknownDefinition(record.default_name.clone()))?;

    if base.is_layer != (record.kind == RecordKind::Layer) {
        return Err(StateError::KindMismatch(record.default_name.clone()));
    }

    let names = record.member_names();
    if names.len() != base.len() && !base.force_sane {
        return Err(StateError::MemberCountMismatch {
            name: record.default_name.clone(),
            expected: base.len(),
            found: names.len(),
        });
    }
    Ok(base
        .restored(names, record.custom_name.clone())
        .anchored(record.member_anchors()))
}
