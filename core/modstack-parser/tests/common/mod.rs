//! Shared test helpers for parser tests.

#![allow(dead_code)]

use modstack_catalog::{Catalog, ClusterTypeDefinition};
use modstack_parser::{Cluster, Item, ParseStep};
use modstack_types::Primitive;
use std::sync::Arc;

/// Bare primitive item from `TYPE:name` shorthand.
pub fn item(shorthand: &str) -> Item {
    Item::Primitive(prim(shorthand))
}

pub fn prim(shorthand: &str) -> Primitive {
    Primitive::parse(shorthand).unwrap()
}

pub fn items(shorthands: &[&str]) -> Vec<Item> {
    shorthands.iter().map(|s| item(s)).collect()
}

pub fn prims(shorthands: &[&str]) -> Vec<Primitive> {
    shorthands.iter().map(|s| prim(s)).collect()
}

/// Shared handle to a definition whose slots each admit one type.
pub fn seq(name: &str, types: &[&str], priority: i32) -> Arc<ClusterTypeDefinition> {
    Arc::new(ClusterTypeDefinition::sequence(name, name.to_uppercase(), types).with_priority(priority))
}

pub fn double_bevel() -> ClusterTypeDefinition {
    ClusterTypeDefinition::sequence("Double Bevel", "DOUBLE_BEVEL", &["BEVEL", "BEVEL"])
        .with_priority(20)
}

pub fn triple_bevel() -> ClusterTypeDefinition {
    ClusterTypeDefinition::sequence("Triple Bevel", "TRIPLE_BEVEL", &["BEVEL", "BEVEL", "BEVEL"])
        .with_priority(30)
}

/// Catalog of only the given definitions.
pub fn catalog_of(definitions: Vec<ClusterTypeDefinition>) -> Catalog {
    let mut catalog = Catalog::new();
    for d in definitions {
        catalog.register(d, false).unwrap();
    }
    catalog
}

/// Short description of a step: `skip:name` or `create:Default Name[a,b]`.
pub fn describe(step: &ParseStep) -> String {
    match step {
        ParseStep::Skip(item) => format!("skip:{}", item.name()),
        ParseStep::Create(cluster) => describe_cluster(cluster),
    }
}

pub fn describe_cluster(cluster: &Cluster) -> String {
    use modstack_parser::HasMembers;
    let members: Vec<String> = cluster
        .members()
        .iter()
        .map(|m| match m {
            Item::Primitive(p) => p.name.clone(),
            Item::Cluster(c) => describe_cluster(c),
        })
        .collect();
    format!(
        "{}[{}]",
        cluster.definition().default_name,
        members.join(",")
    )
}

/// Describes a list of items the same way as [`describe`].
pub fn describe_items(items: &[Item]) -> Vec<String> {
    items
        .iter()
        .map(|i| match i {
            Item::Primitive(p) => format!("skip:{}", p.name),
            Item::Cluster(c) => describe_cluster(c),
        })
        .collect()
}
