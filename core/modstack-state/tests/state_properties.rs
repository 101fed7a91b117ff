mod common;

use common::{describe, parsed, parser};
use modstack_catalog::Catalog;
use modstack_parser::{HasMembers, Item, ParsedLayer};
use modstack_state::{PersistedState, cleanup, restore, save};
use modstack_types::{ClusterIndex, Primitive};
use proptest::prelude::*;
use proptest::sample::Index;
use std::collections::BTreeSet;

const TYPES: &[&str] = &["BEVEL", "WEIGHTED_NORMAL", "MIRROR", "SUBSURF", "BOOLEAN"];

fn arb_stack() -> impl Strategy<Value = Vec<Primitive>> {
    prop::collection::vec(0..TYPES.len(), 0..20).prop_map(|kinds| {
        kinds
            .into_iter()
            .enumerate()
            .map(|(i, k)| Primitive::new(format!("mod.{i:03}"), TYPES[k]))
            .collect()
    })
}

/// A change a user could make to a parsed layout before it is saved.
#[derive(Debug, Clone)]
enum Edit {
    DissolveLayer(Index),
    Rename(Index),
    Tag(Index),
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        any::<Index>().prop_map(Edit::DissolveLayer),
        any::<Index>().prop_map(Edit::Rename),
        any::<Index>().prop_map(Edit::Tag),
    ]
}

fn apply_edit(layer: &mut ParsedLayer, edit: &Edit, round: usize) {
    match edit {
        Edit::DissolveLayer(pick) => {
            let layers: Vec<usize> = layer
                .items()
                .iter()
                .enumerate()
                .filter(|(_, i)| i.as_cluster().is_some_and(|c| c.is_layer()))
                .map(|(pos, _)| pos)
                .collect();
            if layers.is_empty() {
                return;
            }
            let pos = layers[pick.index(layers.len())];
            if let Item::Cluster(c) = layer.items_mut().remove(pos) {
                let members = c.into_members();
                layer.items_mut().splice(pos..pos, members);
            }
        }
        Edit::Rename(pick) | Edit::Tag(pick) => {
            let clusters: Vec<ClusterIndex> =
                layer.clusters().into_iter().map(|c| c.index()).collect();
            if clusters.is_empty() {
                return;
            }
            let index = clusters[pick.index(clusters.len())];
            if let Some(cluster) = layer.find_mut(index) {
                if matches!(edit, Edit::Rename(_)) {
                    cluster.set_custom_name(Some(format!("custom {round}")));
                } else {
                    cluster.set_tag("HIDDEN", true);
                }
            }
        }
    }
}

fn tags_of(items: &[Item]) -> Vec<BTreeSet<String>> {
    ParsedLayer::new(items.to_vec())
        .clusters()
        .into_iter()
        .map(|c| c.custom_tags().clone())
        .collect()
}

proptest! {
    #[test]
    fn restore_reproduces_the_saved_layout(stack in arb_stack()) {
        let catalog = Catalog::with_defaults();
        let original = parsed(&stack);
        let json = save(original.items()).to_json().unwrap();
        let state = PersistedState::from_json(&json).unwrap();

        let mut restored = restore(&mut parser(), &state, &catalog, stack).unwrap();
        prop_assert!(restored.rejected.is_empty());
        cleanup(&mut restored.layer, &catalog);
        prop_assert_eq!(describe(restored.layer.items()), describe(original.items()));
    }

    #[test]
    fn restore_reproduces_an_edited_layout(
        stack in arb_stack(),
        edits in prop::collection::vec(arb_edit(), 1..4),
    ) {
        let catalog = Catalog::with_defaults();
        let mut edited = parsed(&stack);
        for (round, edit) in edits.iter().enumerate() {
            apply_edit(&mut edited, edit, round);
        }
        let state = save(edited.items());

        let mut restored = restore(&mut parser(), &state, &catalog, stack).unwrap();
        prop_assert!(restored.rejected.is_empty());
        cleanup(&mut restored.layer, &catalog);
        prop_assert_eq!(describe(restored.layer.items()), describe(edited.items()));
        prop_assert_eq!(tags_of(restored.layer.items()), tags_of(edited.items()));
    }
}
