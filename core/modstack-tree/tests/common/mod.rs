//! Shared test helpers for tree tests.

#![allow(dead_code)]

use modstack_catalog::{Catalog, ClusterTypeDefinition};
use modstack_parser::{Cluster, HasMembers, Item};
use modstack_tree::{ClusterTree, InMemoryHost, ModifierHost, TreeConfig};
use modstack_types::{ClusterIndex, Primitive};

pub fn host(shorthands: &[&str]) -> InMemoryHost {
    InMemoryHost::with_stack(
        shorthands
            .iter()
            .map(|s| Primitive::parse(s).unwrap())
            .collect(),
    )
}

/// A tree over the stock catalog, already built for `host`.
pub fn tree_for(host: &InMemoryHost) -> ClusterTree {
    tree_with(Catalog::with_defaults(), host)
}

pub fn tree_with(catalog: Catalog, host: &InMemoryHost) -> ClusterTree {
    let mut tree = ClusterTree::new(catalog, TreeConfig::default());
    tree.create_list(host);
    tree
}

/// Only a dynamic two-bevel group, so nothing else competes.
pub fn group_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .register(
            ClusterTypeDefinition::sequence("Bevel Group", "BEVEL_GROUP", &["BEVEL", "BEVEL"])
                .dynamic(),
            false,
        )
        .unwrap();
    catalog
}

pub fn stack_names(host: &InMemoryHost) -> Vec<String> {
    host.primitive_list().into_iter().map(|p| p.name).collect()
}

/// Index of the first cluster (depth-first) with this default name.
pub fn index_of(tree: &ClusterTree, default_name: &str) -> ClusterIndex {
    tree.get_tree()
        .clusters()
        .into_iter()
        .find(|c| c.definition().default_name == default_name)
        .map(Cluster::index)
        .unwrap()
}

/// `name` for primitives, `Default Name "shown"[members]` for clusters.
pub fn describe(tree: &ClusterTree) -> Vec<String> {
    tree.get_tree().items().iter().map(describe_item).collect()
}

fn describe_item(item: &Item) -> String {
    match item {
        Item::Primitive(p) => p.name.clone(),
        Item::Cluster(c) => {
            let members: Vec<String> = c.members().iter().map(describe_item).collect();
            format!(
                "{} \"{}\"[{}]",
                c.definition().default_name,
                c.name(),
                members.join(",")
            )
        }
    }
}

pub const BEVEL_STACK: &[&str] = &[
    "BEVEL:a",
    "BEVEL:b",
    "BEVEL:c",
    "BEVEL:d",
    "WEIGHTED_NORMAL:w",
];

/// Parses to `[Double Bevel[a,b], Mirrored Subdivision[m,s], t]`.
pub const MIXED_STACK: &[&str] = &[
    "BEVEL:a",
    "BEVEL:b",
    "MIRROR:m",
    "SUBSURF:s",
    "SUBSURF:t",
];
