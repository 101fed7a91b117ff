mod common;

use common::seq;
use modstack_catalog::{Catalog, ClusterTypeDefinition};
use modstack_parser::{
    Candidates, ClusterParser, Item, ParseStep, ParserConfig, flatten, primitive_multiset,
};
use modstack_types::Primitive;
use proptest::prelude::*;
use std::sync::Arc;

const TYPES: &[&str] = &["BEVEL", "WEIGHTED_NORMAL", "MIRROR", "SUBSURF", "BOOLEAN"];

fn arb_stack() -> impl Strategy<Value = Vec<Primitive>> {
    prop::collection::vec(0..TYPES.len(), 0..24).prop_map(|kinds| {
        kinds
            .into_iter()
            .enumerate()
            .map(|(i, k)| Primitive::new(format!("mod.{i:03}"), TYPES[k]))
            .collect()
    })
}

proptest! {
    #[test]
    fn parse_object_keeps_primitive_order(stack in arb_stack()) {
        let catalog = Catalog::with_defaults();
        let mut parser = ClusterParser::new(ParserConfig::default());
        let parsed = parser.parse_object(stack.clone(), &catalog).unwrap();
        let flat: Vec<Primitive> = flatten(parsed.layer.items()).into_iter().cloned().collect();
        prop_assert_eq!(flat, stack);
    }

    #[test]
    fn single_pass_preserves_multiset(stack in arb_stack()) {
        let catalog = Catalog::with_defaults();
        let items: Vec<Item> = stack.into_iter().map(Item::from).collect();
        let before = primitive_multiset(&items);
        let mut parser = ClusterParser::new(ParserConfig::default());
        let outcome = parser
            .parse(items, Candidates::clusters(&catalog).as_slice())
            .unwrap();
        prop_assert_eq!(primitive_multiset(&outcome.into_items()), before);
    }

    #[test]
    fn layering_reaches_a_fixed_point(stack in arb_stack()) {
        let catalog = Catalog::with_defaults();
        let mut parser = ClusterParser::new(ParserConfig::default());
        let parsed = parser.parse_object(stack, &catalog).unwrap();
        let again = parser
            .parse_recursively(
                parsed.layer.clone().into_items(),
                Candidates::layers(&catalog).as_slice(),
            )
            .unwrap();
        prop_assert_eq!(again.passes, 1);
        let before: Vec<(bool, String)> = parsed
            .layer
            .items()
            .iter()
            .map(|i| (i.is_cluster(), i.name().to_string()))
            .collect();
        let after: Vec<(bool, String)> = again
            .items
            .iter()
            .map(|i| (i.is_cluster(), i.name().to_string()))
            .collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn longer_match_wins_for_any_priorities(short_priority in -50i32..50, long_priority in -50i32..50) {
        let short = seq("Short", &["A"], short_priority);
        let long = seq("Long", &["A", "B"], long_priority);
        let items = vec![
            Item::from(Primitive::new("a", "A")),
            Item::from(Primitive::new("b", "B")),
        ];
        let mut parser = ClusterParser::new(ParserConfig::default());
        let outcome = parser.parse(items, &[short, long]).unwrap();
        let ParseStep::Create(first) = &outcome.steps[0] else {
            panic!("expected a cluster first");
        };
        prop_assert_eq!(first.definition().default_name.as_str(), "Long");
    }

    #[test]
    fn restored_shape_always_wins(priority in 0i32..1000) {
        let fresh = seq("Fresh", &["A", "B"], priority);
        let restored = Arc::new(
            ClusterTypeDefinition::sequence("Kept", "KEPT", &["A"])
                .restored(vec!["a".into()], None),
        );
        let items = vec![
            Item::from(Primitive::new("a", "A")),
            Item::from(Primitive::new("b", "B")),
        ];
        let mut parser = ClusterParser::new(ParserConfig::default());
        let outcome = parser.parse(items, &[fresh, restored]).unwrap();
        let ParseStep::Create(first) = &outcome.steps[0] else {
            panic!("expected a cluster first");
        };
        prop_assert_eq!(first.definition().default_name.as_str(), "Kept");
    }
}
