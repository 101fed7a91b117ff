//! Re-running the parser with restored definitions.

use crate::{PersistedState, RejectedRecord, StateResult, load};
use modstack_catalog::Catalog;
use modstack_parser::{
    Candidates, ClusterParser, Diagnostics, HasMembers, Item, ParseResult, ParsedLayer,
    bare_items,
};
use modstack_types::{DefinitionIndex, Primitive};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::info;

/// A layer rebuilt from a record, before cleanup.
#[derive(Debug)]
pub struct RestoredLayer {
    /// Clusters that came from the record still carry their restored definitions.
    pub layer: ParsedLayer,
    pub rejected: Vec<RejectedRecord>,
    pub diagnostics: Diagnostics,
    pub stack_changed: bool,
}

/// Rebuilds the layout of `live` from `state`.
///
/// Recorded leaf shapes are matched first, on their own. Primitives they do
/// not cover and that were not recorded as bare get a fresh leaf pass with
/// the catalog's cluster types. Recorded layers are rebuilt next, then the
/// catalog's layer types run over whatever the record does not pin.
pub fn restore(
    parser: &mut ClusterParser,
    state: &PersistedState,
    catalog: &Catalog,
    live: Vec<Primitive>,
) -> StateResult<RestoredLayer> {
    let restoration = load(state, catalog, &live)?;
    let mut diagnostics = Diagnostics::new();
    let bare = &restoration.bare;
    let pinned = |item: &Item| is_pinned(item, bare);

    let recorded_leaves =
        Candidates::clusters(catalog).with_extra(restoration.leaf_definitions.iter().cloned(), true);
    let outcome = parser.parse(bare_items(live), recorded_leaves.as_slice())?;
    let mut items: Vec<Item> = outcome.steps.into_iter().map(|s| s.into_item()).collect();
    diagnostics.extend(outcome.diagnostics);
    apply_tags(&mut items, &restoration.custom_tags);

    let fresh_leaves = Candidates::clusters(catalog);
    items = parse_unpinned(items, pinned, |run| {
        let outcome = parser.parse(run, fresh_leaves.as_slice())?;
        let items: Vec<Item> = outcome.steps.into_iter().map(|s| s.into_item()).collect();
        diagnostics.extend(outcome.diagnostics);
        Ok(items)
    })?;

    let recorded_layers = Candidates::new(restoration.layer_definitions.iter().cloned());
    if !recorded_layers.is_empty() {
        let layered = parser.parse_recursively(items, recorded_layers.as_slice())?;
        diagnostics.extend(layered.diagnostics);
        items = layered.items;
        apply_tags(&mut items, &restoration.custom_tags);
    }

    let fresh_layers = Candidates::layers(catalog);
    items = parse_unpinned(items, pinned, |run| {
        let layered = parser.parse_recursively(run, fresh_layers.as_slice())?;
        diagnostics.extend(layered.diagnostics);
        Ok(layered.items)
    })?;

    info!(
        restored = restoration.restored_count(),
        rejected = restoration.rejected.len(),
        stack_changed = restoration.stack_changed,
        "restored cluster layout"
    );
    Ok(RestoredLayer {
        layer: ParsedLayer::new(items),
        rejected: restoration.rejected,
        diagnostics,
        stack_changed: restoration.stack_changed,
    })
}

/// Items the record decides: restored clusters and recorded-bare primitives.
fn is_pinned(item: &Item, bare: &BTreeSet<String>) -> bool {
    match item {
        Item::Primitive(p) => bare.contains(&p.name),
        Item::Cluster(c) => c.definition().is_restored(),
    }
}

/// Runs `parse` over each maximal run of unpinned items, leaving pinned
/// items where they are.
fn parse_unpinned(
    items: Vec<Item>,
    pinned: impl Fn(&Item) -> bool,
    mut parse: impl FnMut(Vec<Item>) -> ParseResult<Vec<Item>>,
) -> ParseResult<Vec<Item>> {
    let mut out = Vec::with_capacity(items.len());
    let mut run = Vec::new();
    for item in items {
        if pinned(&item) {
            if !run.is_empty() {
                out.extend(parse(std::mem::take(&mut run))?);
            }
            out.push(item);
        } else {
            run.push(item);
        }
    }
    if !run.is_empty() {
        out.extend(parse(run)?);
    }
    Ok(out)
}

fn apply_tags(items: &mut [Item], tags: &BTreeMap<DefinitionIndex, BTreeSet<String>>) {
    for item in items {
        if let Item::Cluster(c) = item {
            if let Some(recorded) = tags.get(&c.definition().index) {
                for tag in recorded {
                    c.set_tag(tag.clone(), true);
                }
            }
            apply_tags(c.children_mut(), tags);
        }
    }
}

/// Strips restoration data from every cluster in `layer`.
///
/// Each restored cluster gets its catalog definition back, or a cleaned copy
/// of its restored one when the catalog no longer has a matching type.
/// Returns the number of clusters cleaned.
pub fn cleanup(layer: &mut ParsedLayer, catalog: &Catalog) -> usize {
    let mut cleaned = 0;
    cleanup_items(layer.children_mut(), catalog, &mut cleaned);
    cleaned
}

fn cleanup_items(items: &mut [Item], catalog: &Catalog, cleaned: &mut usize) {
    for item in items {
        if let Item::Cluster(c) = item {
            if c.definition().is_restored() {
                let clean = match catalog.lookup_by_name(&c.definition().default_name) {
                    Some(d) if d.is_layer == c.is_layer() && d.len() == c.definition().len() => {
                        Arc::clone(d)
                    }
                    _ => Arc::new(c.definition().cleaned()),
                };
                c.set_definition(clean);
                *cleaned += 1;
            }
            cleanup_items(c.children_mut(), catalog, cleaned);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prim(name: &str) -> Item {
        Item::Primitive(Primitive::new(name, "BEVEL"))
    }

    #[test]
    fn parse_unpinned_keeps_pinned_items_in_place() {
        let items = vec![prim("a"), prim("b"), prim("pin"), prim("c")];
        let mut runs = Vec::new();
        let out = parse_unpinned(
            items,
            |i| i.name() == "pin",
            |run| {
                runs.push(run.iter().map(|i| i.name().to_string()).collect::<Vec<_>>());
                Ok(run)
            },
        )
        .unwrap();
        let names: Vec<&str> = out.iter().map(Item::name).collect();
        assert_eq!(names, vec!["a", "b", "pin", "c"]);
        assert_eq!(runs, vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn bare_primitives_are_pinned() {
        let bare: BTreeSet<String> = ["a".to_string()].into();
        assert!(is_pinned(&prim("a"), &bare));
        assert!(!is_pinned(&prim("b"), &bare));
    }
}
