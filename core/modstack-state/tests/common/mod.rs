//! Shared test helpers for state tests.

#![allow(dead_code)]

use modstack_catalog::Catalog;
use modstack_parser::{ClusterParser, HasMembers, Item, ParsedLayer, ParserConfig};
use modstack_types::Primitive;

pub fn prims(shorthands: &[&str]) -> Vec<Primitive> {
    shorthands
        .iter()
        .map(|s| Primitive::parse(s).unwrap())
        .collect()
}

pub fn parser() -> ClusterParser {
    ClusterParser::new(ParserConfig::default())
}

/// Parses `stack` from scratch with the stock catalog.
pub fn parsed(stack: &[Primitive]) -> ParsedLayer {
    parser()
        .parse_object(stack.to_vec(), &Catalog::with_defaults())
        .unwrap()
        .layer
}

/// `name` for primitives, `Default Name "shown"[members]` for clusters.
pub fn describe(items: &[Item]) -> Vec<String> {
    items.iter().map(describe_item).collect()
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
