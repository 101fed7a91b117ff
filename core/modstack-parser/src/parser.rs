//! Partitioning item sequences into clusters.
//!
//! The parser reads items one at a time into a decision window. Every live
//! candidate definition is re-checked against the window after each item:
//! candidates needing more input stay alive, full matches are parked as
//! confirmed, rejections drop out. Once nothing is alive the window is
//! decided: the best confirmed candidate takes its share of the window and
//! the rest goes back to the input; with nothing confirmed, every window item
//! passes through untouched.

use crate::{
    Cluster, Diagnostics, HasMembers, Item, ParseError, ParseResult, ParsedLayer, ParserConfig,
    check_availability, primitive_multiset, select_winner,
};
use modstack_catalog::{Catalog, ClusterTypeDefinition};
use modstack_types::{Availability, IndexAllocator, Primitive};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-unit decision of one parse pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseStep {
    /// An item that matched nothing, passed through unchanged.
    Skip(Item),
    /// A freshly instantiated cluster holding the items it consumed.
    Create(Cluster),
}

impl ParseStep {
    #[must_use]
    pub fn into_item(self) -> Item {
        match self {
            Self::Skip(item) => item,
            Self::Create(cluster) => Item::Cluster(cluster),
        }
    }

    #[must_use]
    pub fn is_create(&self) -> bool {
        matches!(self, Self::Create(_))
    }

    /// Primitives this step carries, in stack order.
    #[must_use]
    pub fn primitives(&self) -> Vec<&Primitive> {
        match self {
            Self::Skip(item) => item.primitives(),
            Self::Create(cluster) => cluster.primitives(),
        }
    }
}

/// Result of a single parse pass.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub steps: Vec<ParseStep>,
    pub diagnostics: Diagnostics,
}

impl ParseOutcome {
    /// Number of clusters this pass created.
    #[must_use]
    pub fn created(&self) -> usize {
        self.steps.iter().filter(|s| s.is_create()).count()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Item> {
        self.steps.into_iter().map(ParseStep::into_item).collect()
    }
}

/// Result of repeated layering passes.
#[derive(Debug, Clone, Default)]
pub struct LayeringOutcome {
    pub items: Vec<Item>,
    /// Passes actually run.
    pub passes: usize,
    pub diagnostics: Diagnostics,
}

/// Result of parsing a whole object's stack.
#[derive(Debug, Clone, Default)]
pub struct ObjectParse {
    pub layer: ParsedLayer,
    pub diagnostics: Diagnostics,
}

/// The set of definitions one parse call tries.
///
/// Holds shared handles only; matching never copies a definition.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    definitions: Vec<Arc<ClusterTypeDefinition>>,
}

impl Candidates {
    /// Builds a candidate set, dropping repeated handles.
    pub fn new(definitions: impl IntoIterator<Item = Arc<ClusterTypeDefinition>>) -> Self {
        let mut set = Self::default();
        for definition in definitions {
            set.push(definition);
        }
        set
    }

    /// The catalog's leaf cluster types.
    #[must_use]
    pub fn clusters(catalog: &Catalog) -> Self {
        Self::new(catalog.cluster_types().iter().cloned())
    }

    /// The catalog's layer types.
    #[must_use]
    pub fn layers(catalog: &Catalog) -> Self {
        Self::new(catalog.layer_types().iter().cloned())
    }

    /// Puts `extra` in front of the current set, or in place of it when
    /// `no_available_types` is set.
    #[must_use]
    pub fn with_extra(
        self,
        extra: impl IntoIterator<Item = Arc<ClusterTypeDefinition>>,
        no_available_types: bool,
    ) -> Self {
        let mut merged = Self::new(extra);
        if !no_available_types {
            for definition in self.definitions {
                merged.push(definition);
            }
        }
        merged
    }

    /// Drops every definition with this default name.
    #[must_use]
    pub fn excluding(mut self, default_name: &str) -> Self {
        self.definitions.retain(|d| d.default_name != default_name);
        self
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Arc<ClusterTypeDefinition>] {
        &self.definitions
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    fn push(&mut self, definition: Arc<ClusterTypeDefinition>) {
        if !self.definitions.iter().any(|d| Arc::ptr_eq(d, &definition)) {
            self.definitions.push(definition);
        }
    }
}

/// State of the current decision window.
struct Window<'c> {
    all: &'c [Arc<ClusterTypeDefinition>],
    pending: Vec<Item>,
    alive: Vec<Arc<ClusterTypeDefinition>>,
    confirmed: Vec<Arc<ClusterTypeDefinition>>,
}

impl<'c> Window<'c> {
    fn new(all: &'c [Arc<ClusterTypeDefinition>]) -> Self {
        Self {
            all,
            pending: Vec::new(),
            alive: all.to_vec(),
            confirmed: Vec::new(),
        }
    }

    fn reset(&mut self) {
        self.pending.clear();
        self.alive = self.all.to_vec();
        self.confirmed.clear();
    }

    /// Re-checks every live candidate against the window.
    fn advance(&mut self, item: Item) {
        self.pending.push(item);
        let alive = std::mem::take(&mut self.alive);
        for definition in alive {
            match check_availability(&definition, &self.pending) {
                Availability::NeedMore => {
                    if !self.alive.iter().any(|d| Arc::ptr_eq(d, &definition)) {
                        self.alive.push(definition);
                    }
                }
                Availability::Match => self.confirmed.push(definition),
                Availability::Reject => {}
            }
        }
    }

    /// Nothing alive and nothing confirmed: the window cannot form a cluster.
    fn is_dead(&self) -> bool {
        self.alive.is_empty() && self.confirmed.is_empty()
    }

    /// Nothing needs more input and something matched.
    fn is_forced(&self) -> bool {
        self.alive.is_empty() && !self.confirmed.is_empty()
    }
}

/// Groups item sequences into clusters.
///
/// Owns the allocator for cluster indices, so every cluster it (or its
/// caller, through [`ClusterParser::instantiate`]) creates gets a fresh,
/// increasing index.
#[derive(Debug, Clone, Default)]
pub struct ClusterParser {
    config: ParserConfig,
    indices: IndexAllocator,
}

impl ClusterParser {
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            indices: IndexAllocator::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Creates an initialized cluster from `definition` holding `members`.
    pub fn instantiate(
        &mut self,
        definition: Arc<ClusterTypeDefinition>,
        members: Vec<Item>,
    ) -> ParseResult<Cluster> {
        let mut cluster = Cluster::new(definition, self.indices.next_cluster());
        cluster.set_members(members)?;
        Ok(cluster)
    }

    /// Runs one parse pass over `items` with the given candidates.
    pub fn parse(
        &mut self,
        items: Vec<Item>,
        candidates: &[Arc<ClusterTypeDefinition>],
    ) -> ParseResult<ParseOutcome> {
        let before = self
            .config
            .verify_primitives
            .then(|| primitive_multiset(&items));

        let mut outcome = ParseOutcome::default();
        let mut queue: VecDeque<Item> = items.into();
        let mut window = Window::new(candidates);

        loop {
            if let Some(item) = queue.pop_front() {
                window.advance(item);
                if window.is_dead() {
                    Self::skip_window(&mut window, &mut outcome);
                } else if window.is_forced() {
                    self.commit_window(&mut window, &mut queue, &mut outcome)?;
                }
                continue;
            }

            // Input exhausted: decide whatever is still pending.
            if window.pending.is_empty() {
                break;
            }
            if window.confirmed.is_empty() {
                Self::skip_window(&mut window, &mut outcome);
            } else {
                self.commit_window(&mut window, &mut queue, &mut outcome)?;
            }
        }

        if let Some(before) = before {
            let mut after: Vec<Primitive> = outcome
                .steps
                .iter()
                .flat_map(ParseStep::primitives)
                .cloned()
                .collect();
            after.sort();
            if before != after {
                warn!(
                    before = before.len(),
                    after = after.len(),
                    "parse pass changed the primitive multiset"
                );
                return Err(ParseError::PrimitivesChanged {
                    before: before.len(),
                    after: after.len(),
                });
            }
        }
        Ok(outcome)
    }

    fn skip_window(window: &mut Window<'_>, outcome: &mut ParseOutcome) {
        for item in window.pending.drain(..) {
            debug!(item = %item.name(), "no cluster type fits, passing through");
            outcome.steps.push(ParseStep::Skip(item));
        }
        window.reset();
    }

    fn commit_window(
        &mut self,
        window: &mut Window<'_>,
        queue: &mut VecDeque<Item>,
        outcome: &mut ParseOutcome,
    ) -> ParseResult<()> {
        let Some(winner) = select_winner(&window.confirmed).cloned() else {
            Self::skip_window(window, outcome);
            return Ok(());
        };

        let mut members = std::mem::take(&mut window.pending);
        let take = winner.len().min(members.len());
        let leftover = members.split_off(take);
        for item in leftover.into_iter().rev() {
            queue.push_front(item);
        }

        let cluster = self.instantiate(Arc::clone(&winner), members)?;
        debug!(
            cluster = %cluster.name(),
            index = %cluster.index(),
            members = take,
            restored = winner.is_restored(),
            "created cluster"
        );
        outcome.diagnostics.info(format!(
            "created '{}' ({}) from {} item(s)",
            cluster.name(),
            winner.default_name,
            take
        ));
        outcome.steps.push(ParseStep::Create(cluster));
        window.reset();
        Ok(())
    }

    /// Re-parses its own output until the grouping stops changing.
    ///
    /// Each pass treats the previous pass's clusters as items. Stops when a
    /// pass creates nothing, when the top-level type composition is unchanged,
    /// or after `max_layer_iterations` passes.
    pub fn parse_recursively(
        &mut self,
        items: Vec<Item>,
        candidates: &[Arc<ClusterTypeDefinition>],
    ) -> ParseResult<LayeringOutcome> {
        let mut current = items;
        let mut diagnostics = Diagnostics::new();
        let mut passes = 0;
        let mut settled = false;

        while passes < self.config.max_layer_iterations {
            let before = composition(&current);
            let outcome = self.parse(current, candidates)?;
            passes += 1;
            let created = outcome.created();
            let ParseOutcome {
                steps,
                diagnostics: pass_diagnostics,
            } = outcome;
            diagnostics.extend(pass_diagnostics);
            current = steps.into_iter().map(ParseStep::into_item).collect();
            if created == 0 || composition(&current) == before {
                settled = true;
                break;
            }
        }

        if !settled && passes > 0 {
            diagnostics.warn(format!(
                "layering stopped after {passes} passes without settling"
            ));
        }
        Ok(LayeringOutcome {
            items: current,
            passes,
            diagnostics,
        })
    }

    /// Parses a whole stack: leaf cluster types first, then layer types until
    /// the grouping settles.
    pub fn parse_object(
        &mut self,
        primitives: Vec<Primitive>,
        catalog: &Catalog,
    ) -> ParseResult<ObjectParse> {
        let items = crate::bare_items(primitives);
        let leaves = self.parse(items, Candidates::clusters(catalog).as_slice())?;
        let mut diagnostics = leaves.diagnostics.clone();
        let layered =
            self.parse_recursively(leaves.into_items(), Candidates::layers(catalog).as_slice())?;
        diagnostics.extend(layered.diagnostics);
        Ok(ObjectParse {
            layer: ParsedLayer::new(layered.items),
            diagnostics,
        })
    }
}

/// Top-level shape of an item list: kind and type tag per item.
fn composition(items: &[Item]) -> Vec<(bool, String)> {
    items
        .iter()
        .map(|i| (i.is_cluster(), i.type_tag().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bevel(name: &str) -> Item {
        Item::Primitive(Primitive::new(name, "BEVEL"))
    }

    #[test]
    fn composition_distinguishes_kind() {
        let items = vec![bevel("a")];
        assert_eq!(composition(&items), vec![(false, "BEVEL".to_string())]);
    }

    #[test]
    fn window_dead_without_candidates() {
        let mut window = Window::new(&[]);
        window.advance(bevel("a"));
        assert!(window.is_dead());
        assert!(!window.is_forced());
    }

    #[test]
    fn window_forced_once_longest_candidate_matches() {
        let defs = vec![Arc::new(ClusterTypeDefinition::sequence(
            "Double Bevel",
            "DOUBLE_BEVEL",
            &["BEVEL", "BEVEL"],
        ))];
        let mut window = Window::new(&defs);
        window.advance(bevel("a"));
        assert!(!window.is_forced());
        assert_eq!(window.alive.len(), 1);
        window.advance(bevel("b"));
        assert!(window.is_forced());
        assert_eq!(window.confirmed.len(), 1);
    }
}
