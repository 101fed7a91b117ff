//! Tests for the command line helpers.

use modstack_catalog::{Catalog, ClusterTypeDefinition};
use modstack_cli::{build_tree, load_catalog, load_stack, render_catalog, render_tree};
use modstack_state::save;
use modstack_tree::TreeConfig;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn shorthands(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ── Loading ─────────────────────────────────────────────────────

#[test]
fn stack_loads_from_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stack.json");
    fs::write(
        &path,
        r#"[{"name": "a", "type": "BEVEL"}, {"name": "w", "type": "WEIGHTED_NORMAL"}]"#,
    )
    .unwrap();

    let stack = load_stack(Some(&path), &[]).unwrap();
    let names: Vec<&str> = stack.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "w"]);
    assert_eq!(stack[1].type_tag, "WEIGHTED_NORMAL");
}

#[test]
fn stack_loads_from_shorthands() {
    let stack = load_stack(None, &shorthands(&["BEVEL:a", "SUBSURF:s"])).unwrap();
    assert_eq!(stack.len(), 2);
    assert!(load_stack(None, &shorthands(&["nocolon"])).is_err());
}

#[test]
fn stack_file_and_shorthands_conflict() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stack.json");
    fs::write(&path, "[]").unwrap();
    assert!(load_stack(Some(&path), &shorthands(&["BEVEL:a"])).is_err());
}

#[test]
fn missing_files_are_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");
    assert!(load_stack(Some(&path), &[]).is_err());
    assert!(load_catalog(Some(&path), false).is_err());
}

#[test]
fn catalog_loads_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    let mut catalog = Catalog::new();
    catalog
        .register(
            ClusterTypeDefinition::sequence("Pair", "PAIR", &["ARRAY", "ARRAY"]),
            false,
        )
        .unwrap();
    fs::write(&path, catalog.to_file_contents().unwrap()).unwrap();

    let loaded = load_catalog(Some(&path), false).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.lookup_by_name("Pair").is_some());
}

#[test]
fn stock_catalog_without_a_file() {
    let catalog = load_catalog(None, false).unwrap();
    assert_eq!(catalog.len(), Catalog::with_defaults().len());
}

// ── Rendering ───────────────────────────────────────────────────

#[test]
fn tree_renders_indented() {
    let stack = load_stack(
        None,
        &shorthands(&["BEVEL:a", "BEVEL:b", "SUBSURF:s"]),
    )
    .unwrap();
    let tree = build_tree(stack, Catalog::with_defaults(), TreeConfig::default(), None).unwrap();
    let rendered = render_tree(tree.get_tree());
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 4);
    let index = lines[0]
        .strip_prefix("[DOUBLE_BEVEL] Double Bevel <Double Bevel> cluster #")
        .unwrap();
    assert!(!index.is_empty() && index.chars().all(|c| c.is_ascii_digit()), "{}", lines[0]);
    assert_eq!(lines[1], "  a (BEVEL)");
    assert_eq!(lines[2], "  b (BEVEL)");
    assert_eq!(lines[3], "s (SUBSURF)");
}

#[test]
fn catalog_renders_one_line_per_definition() {
    let catalog = Catalog::with_defaults();
    let rendered = render_catalog(&catalog);

    assert_eq!(rendered.lines().count(), catalog.len());
    assert!(
        rendered
            .lines()
            .any(|l| l.starts_with("layer") && l.contains("Bevel Stack [BEVEL_STACK]"))
    );
}

// ── Saved layouts ───────────────────────────────────────────────

#[test]
fn saved_layout_is_restored() {
    let stack = load_stack(None, &shorthands(&["BEVEL:a", "BEVEL:b", "BEVEL:c"])).unwrap();

    // A layout where a and b form a Double Bevel and c stays bare.
    let mut catalog = Catalog::new();
    catalog
        .register(
            ClusterTypeDefinition::sequence("Double Bevel", "DOUBLE_BEVEL", &["BEVEL", "BEVEL"]),
            false,
        )
        .unwrap();
    let first = build_tree(stack.clone(), catalog, TreeConfig::default(), None).unwrap();
    let state = save(first.get_tree().items()).to_json().unwrap();

    let restored = build_tree(
        stack,
        Catalog::with_defaults(),
        TreeConfig::default(),
        Some(state),
    )
    .unwrap();
    let rendered = render_tree(restored.get_tree());
    assert!(rendered.contains("<Double Bevel>"));
    assert!(!rendered.contains("Triple Bevel"));
    assert!(rendered.ends_with("c (BEVEL)\n"));
}
