//! Loading and rendering helpers for the modstack command line.

use anyhow::{Context, Result, bail};
use modstack_catalog::Catalog;
use modstack_parser::{HasMembers, Item, ParsedLayer};
use modstack_tree::{ClusterTree, InMemoryHost, ModifierHost, TreeConfig};
use modstack_types::Primitive;
use std::fmt::Write;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Reads a stack from a JSON file, or from `TYPE:name` shorthands.
pub fn load_stack(path: Option<&Path>, shorthands: &[String]) -> Result<Vec<Primitive>> {
    match (path, shorthands.is_empty()) {
        (Some(path), true) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read stack file {}", path.display()))?;
            Primitive::list_from_json(&json)
                .with_context(|| format!("Failed to parse stack file {}", path.display()))
        }
        (None, _) => shorthands
            .iter()
            .map(|s| Primitive::parse(s).with_context(|| format!("Bad primitive '{s}'")))
            .collect(),
        (Some(_), false) => bail!("give either --stack or primitives, not both"),
    }
}

/// Reads a catalog file, or returns the stock catalog.
pub fn load_catalog(path: Option<&Path>, replace: bool) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::with_defaults());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    let catalog = Catalog::from_file_contents(&json, replace)
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;
    info!(definitions = catalog.len(), "loaded catalog from {}", path.display());
    Ok(catalog)
}

/// Builds the tree for `stack`, starting from a saved layout when given.
pub fn build_tree(
    stack: Vec<Primitive>,
    catalog: Catalog,
    config: TreeConfig,
    state: Option<String>,
) -> Result<ClusterTree> {
    let mut host = InMemoryHost::with_stack(stack);
    if let Some(state) = state {
        host.persisted_property_set(&config.state_key, state)
            .context("Failed to hand the saved layout to the host")?;
    }
    let mut tree = ClusterTree::new(catalog, config);
    let grouped = tree.create_list(&host);
    debug!(grouped, "tree built");
    Ok(tree)
}

/// One line per item, members indented under their cluster.
pub fn render_tree(layer: &ParsedLayer) -> String {
    let mut out = String::new();
    render_items(layer.items(), 0, &mut out);
    out
}

fn render_items(items: &[Item], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for item in items {
        match item {
            Item::Primitive(p) => {
                let _ = writeln!(out, "{indent}{} ({})", p.name, p.type_tag);
            }
            Item::Cluster(c) => {
                let kind = if c.is_layer() { "layer" } else { "cluster" };
                let _ = writeln!(
                    out,
                    "{indent}[{}] {} <{}> {kind} {}",
                    c.type_tag(),
                    c.name(),
                    c.definition().default_name,
                    c.index()
                );
                render_items(c.members(), depth + 1, out);
            }
        }
    }
}

/// One line per definition: kind, default name, type tag, pattern.
pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for definition in catalog.iter() {
        let kind = if definition.is_layer { "layer" } else { "cluster" };
        let pattern: Vec<String> = definition.pattern.iter().map(ToString::to_string).collect();
        let _ = writeln!(
            out,
            "{kind:<7} {} [{}] priority={} ({})",
            definition.default_name,
            definition.type_tag,
            definition.priority,
            pattern.join(", ")
        );
    }
    out
}
