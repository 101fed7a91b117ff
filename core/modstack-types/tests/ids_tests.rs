use modstack_types::{ClusterIndex, DefinitionIndex, IndexAllocator};
use proptest::prelude::*;
use std::collections::HashSet;

// ── IndexAllocator ───────────────────────────────────────────────

#[test]
fn allocator_starts_at_one() {
    let mut alloc = IndexAllocator::new();
    assert_eq!(alloc.next_cluster(), ClusterIndex::new(1));
}

#[test]
fn default_allocator_also_starts_at_one() {
    let mut alloc = IndexAllocator::default();
    assert_eq!(alloc.peek(), 1);
    assert_eq!(alloc.next_definition(), DefinitionIndex::new(1));
}

#[test]
fn allocator_is_monotonic_across_kinds() {
    let mut alloc = IndexAllocator::new();
    let a = alloc.next_cluster();
    let b = alloc.next_definition();
    let c = alloc.next_cluster();
    assert!(a.value() < b.value());
    assert!(b.value() < c.value());
}

#[test]
fn allocated_indices_are_unique() {
    let mut alloc = IndexAllocator::new();
    let set: HashSet<ClusterIndex> = (0..100).map(|_| alloc.next_cluster()).collect();
    assert_eq!(set.len(), 100);
}

// ── ClusterIndex ─────────────────────────────────────────────────

#[test]
fn cluster_index_display() {
    assert_eq!(ClusterIndex::new(7).to_string(), "#7");
}

#[test]
fn cluster_index_parse_with_and_without_hash() {
    assert_eq!("#12".parse::<ClusterIndex>().unwrap(), ClusterIndex::new(12));
    assert_eq!("12".parse::<ClusterIndex>().unwrap(), ClusterIndex::new(12));
}

#[test]
fn cluster_index_parse_invalid() {
    assert!("#x".parse::<ClusterIndex>().is_err());
    assert!("".parse::<ClusterIndex>().is_err());
}

#[test]
fn cluster_index_serializes_transparently() {
    let json = serde_json::to_string(&ClusterIndex::new(3)).unwrap();
    assert_eq!(json, "3");
}

proptest! {
    #[test]
    fn cluster_index_ordering_follows_value(a in any::<u64>(), b in any::<u64>()) {
        prop_assert_eq!(ClusterIndex::new(a) < ClusterIndex::new(b), a < b);
    }
}
