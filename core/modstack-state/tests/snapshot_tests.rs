mod common;

use common::prims;
use modstack_state::StackSnapshot;
use pretty_assertions::assert_eq;

#[test]
fn snapshot_matches_captured_stack() {
    let stack = prims(&["BEVEL:a", "MIRROR:m"]);
    let snapshot = StackSnapshot::capture(&stack);
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.entries()[1].index, 1);
    assert!(!snapshot.differs_from(&stack));
}

#[test]
fn snapshot_notices_changes() {
    let snapshot = StackSnapshot::capture(&prims(&["BEVEL:a", "MIRROR:m"]));
    assert!(snapshot.differs_from(&prims(&["MIRROR:m", "BEVEL:a"])));
    assert!(snapshot.differs_from(&prims(&["BEVEL:a"])));
    assert!(snapshot.differs_from(&prims(&["BEVEL:a", "SUBSURF:m"])));
    assert!(snapshot.differs_from(&prims(&["BEVEL:a", "MIRROR:m2"])));
}

#[test]
fn empty_snapshot() {
    let snapshot = StackSnapshot::default();
    assert!(snapshot.is_empty());
    assert!(!snapshot.differs_from(&[]));
}

#[test]
fn snapshot_json_round_trip() {
    let snapshot = StackSnapshot::capture(&prims(&["BEVEL:a"]));
    let json = snapshot.to_json().unwrap();
    assert_eq!(json, r#"[{"index":0,"name":"a","type":"BEVEL"}]"#);
    assert_eq!(StackSnapshot::from_json(&json).unwrap(), snapshot);
}
