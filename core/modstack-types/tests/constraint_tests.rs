use modstack_types::{Availability, Constraint};

// ── Constraint ───────────────────────────────────────────────────

#[test]
fn any_admits_everything() {
    assert!(Constraint::Any.admits("BEVEL"));
    assert!(Constraint::Any.admits(""));
    assert!(Constraint::Any.is_any());
}

#[test]
fn one_of_admits_members_only() {
    let c = Constraint::one_of(["BEVEL", "CHAMFER"]);
    assert!(c.admits("BEVEL"));
    assert!(c.admits("CHAMFER"));
    assert!(!c.admits("MIRROR"));
    assert!(!c.is_any());
}

#[test]
fn empty_set_is_empty() {
    let c = Constraint::one_of(Vec::<String>::new());
    assert!(c.is_empty());
    assert!(!c.admits("BEVEL"));
    assert!(!Constraint::Any.is_empty());
}

#[test]
fn single_value() {
    assert_eq!(Constraint::exactly("BEVEL").single(), Some("BEVEL"));
    assert_eq!(Constraint::one_of(["A", "B"]).single(), None);
    assert_eq!(Constraint::Any.single(), None);
}

#[test]
fn constraint_display() {
    assert_eq!(Constraint::Any.to_string(), "*");
    assert_eq!(Constraint::one_of(["B", "A"]).to_string(), "A|B");
}

#[test]
fn constraint_json_shape() {
    assert_eq!(serde_json::to_string(&Constraint::Any).unwrap(), r#""any""#);
    assert_eq!(
        serde_json::to_string(&Constraint::exactly("BEVEL")).unwrap(),
        r#"{"one_of":["BEVEL"]}"#
    );
    let parsed: Constraint = serde_json::from_str(r#"{"one_of":["MIRROR"]}"#).unwrap();
    assert_eq!(parsed, Constraint::exactly("MIRROR"));
}

// ── Availability ─────────────────────────────────────────────────

#[test]
fn availability_predicates() {
    assert!(Availability::Match.is_match());
    assert!(Availability::Match.is_alive());
    assert!(Availability::NeedMore.is_alive());
    assert!(!Availability::NeedMore.is_match());
    assert!(!Availability::Reject.is_alive());
}
