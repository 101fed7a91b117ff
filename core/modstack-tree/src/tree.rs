//! The runtime cluster tree and its mutation API.
//!
//! Every mutation works on a copy of the tree: the copy is edited, the host
//! stack is changed to match, and only then is the copy installed. A failed
//! edit therefore leaves the tree untouched. After installing, the tree's
//! flattened primitive order is compared with the live stack; on any
//! disagreement the tree is re-derived from the stack.

use crate::{
    HostResult, ItemId, ModifierHost, Selection, TreeConfig, TreeError, TreeResult,
};
use modstack_catalog::{Catalog, CatalogError, CatalogFile, ClusterTypeDefinition};
use modstack_parser::{
    Candidates, Cluster, ClusterParser, Diagnostics, HasMembers, Item, ParsedLayer, bare_items,
    check_availability,
};
use modstack_state::{PersistedState, StackSnapshot, cleanup, restore, save};
use modstack_types::{ClusterIndex, Direction, Primitive};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Parsed layout of one object's primitive stack.
#[derive(Debug)]
pub struct ClusterTree {
    config: TreeConfig,
    catalog: Catalog,
    parser: ClusterParser,
    root: ParsedLayer,
    active: Option<ItemId>,
    selection: Selection,
    /// Stack the installed tree was built against.
    snapshot: StackSnapshot,
    diagnostics: Diagnostics,
}

impl ClusterTree {
    #[must_use]
    pub fn new(catalog: Catalog, config: TreeConfig) -> Self {
        let parser = ClusterParser::new(config.parser.clone());
        Self {
            config,
            catalog,
            parser,
            root: ParsedLayer::default(),
            active: None,
            selection: Selection::default(),
            snapshot: StackSnapshot::default(),
            diagnostics: Diagnostics::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Diagnostics of the most recent parse or restoration.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Registers every definition of a catalog file, replacing existing ones
    /// only when the config allows it. Either all register or none do.
    pub fn load_definitions(&mut self, json: &str) -> TreeResult<usize> {
        let file: CatalogFile = serde_json::from_str(json).map_err(CatalogError::from)?;
        let mut catalog = self.catalog.clone();
        let count = file.definitions.len();
        for definition in file.definitions {
            catalog.register(definition, self.config.replace_definitions)?;
        }
        self.catalog = catalog;
        Ok(count)
    }

    // ================================================================
    // Building
    // ================================================================

    /// Builds the tree for the host's stack: from the saved layout when one
    /// is readable, by parsing otherwise. Returns whether any cluster exists.
    pub fn create_list(&mut self, host: &dyn ModifierHost) -> bool {
        self.active = None;
        self.selection.clear();

        if let Some(snapshot) = host
            .persisted_property_get(&self.config.snapshot_key)
            .and_then(|json| StackSnapshot::from_json(&json).ok())
            && snapshot.differs_from(&host.primitive_list())
        {
            info!("stack changed since the layout was saved");
        }

        match self.load_state(host) {
            Ok(()) => {}
            Err(TreeError::NoState) => self.rebuild(host.primitive_list()),
            Err(error) => {
                warn!(error = %error, "saved layout unusable, parsing from scratch");
                self.rebuild(host.primitive_list());
            }
        }

        let clusters = self.root.clusters().len();
        info!(
            clusters,
            primitives = self.snapshot.len(),
            "cluster list created"
        );
        clusters > 0
    }

    /// Re-derives the tree if the live stack is no longer the one the tree
    /// was built against. Returns whether anything was rebuilt.
    pub fn refresh(&mut self, host: &dyn ModifierHost) -> bool {
        let live = host.primitive_list();
        if !self.snapshot.differs_from(&live) {
            return false;
        }
        info!(
            before = self.snapshot.len(),
            after = live.len(),
            "stack changed outside the tree, re-deriving"
        );
        self.relayout(live);
        true
    }

    /// Confirms the tree's flattened order is the live stack, re-deriving
    /// the tree when it is not.
    pub fn check_sync(&mut self, host: &dyn ModifierHost) -> TreeResult<()> {
        let live = host.primitive_list();
        let ours: Vec<Primitive> = self.root.primitives().into_iter().cloned().collect();
        if ours == live {
            return Ok(());
        }
        warn!(
            tree = ours.len(),
            stack = live.len(),
            "tree out of sync with the stack, rebuilding"
        );
        let (expected, found) = (ours.len(), live.len());
        self.relayout(live);
        Err(TreeError::OutOfSync { expected, found })
    }

    /// Parses `live` from scratch. A failed parse leaves every primitive
    /// ungrouped.
    fn rebuild(&mut self, live: Vec<Primitive>) {
        match self.parser.parse_object(live.clone(), &self.catalog) {
            Ok(parsed) => {
                self.diagnostics = parsed.diagnostics;
                self.install(parsed.layer);
            }
            Err(error) => {
                warn!(error = %error, "parse failed, leaving the stack ungrouped");
                self.diagnostics = Diagnostics::new();
                self.diagnostics.warn(format!("parse failed: {error}"));
                self.install(ParsedLayer::new(bare_items(live)));
            }
        }
    }

    /// Lays out `live` again, keeping every cluster of the current tree whose
    /// primitives are still in place.
    fn relayout(&mut self, live: Vec<Primitive>) {
        let state = save(self.root.items());
        match restore(&mut self.parser, &state, &self.catalog, live.clone()) {
            Ok(mut restored) => {
                cleanup(&mut restored.layer, &self.catalog);
                self.diagnostics = restored.diagnostics;
                self.install(restored.layer);
            }
            Err(error) => {
                warn!(error = %error, "could not keep the current layout");
                self.rebuild(live);
            }
        }
    }

    fn install(&mut self, root: ParsedLayer) {
        self.root = root;
        let items = self.root.items();
        self.selection.retain(|id| locate(items, id).is_some());
        if self
            .active
            .as_ref()
            .is_some_and(|id| locate(items, id).is_none())
        {
            self.active = None;
        }
        let primitives: Vec<Primitive> = self.root.primitives().into_iter().cloned().collect();
        self.snapshot = StackSnapshot::capture(&primitives);
    }

    /// Installs `next` once the host side is done, then confirms both agree.
    fn commit(
        &mut self,
        host: &dyn ModifierHost,
        next: ParsedLayer,
        host_result: HostResult<()>,
    ) -> TreeResult<()> {
        if let Err(error) = host_result {
            warn!(error = %error, "host call failed, re-deriving the tree");
            self.relayout(host.primitive_list());
            return Err(error.into());
        }
        self.install(next);
        self.check_sync(host)
    }

    // ================================================================
    // Navigation
    // ================================================================

    #[must_use]
    pub fn get_tree(&self) -> &ParsedLayer {
        &self.root
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        let path = locate(self.root.items(), id)?;
        item_at(self.root.items(), &path)
    }

    #[must_use]
    pub fn cluster(&self, index: ClusterIndex) -> Option<&Cluster> {
        self.root.find(index)
    }

    /// The cluster directly holding `id`, or `None` for a top-level item.
    pub fn owner_of(&self, id: &ItemId) -> TreeResult<Option<&Cluster>> {
        let path = self.path(id)?;
        let parent = &path[..path.len() - 1];
        if parent.is_empty() {
            return Ok(None);
        }
        Ok(item_at(self.root.items(), parent).and_then(Item::as_cluster))
    }

    #[must_use]
    pub fn get_active(&self) -> Option<&Item> {
        self.active.as_ref().and_then(|id| self.get(id))
    }

    pub fn set_active(&mut self, id: impl Into<ItemId>) -> TreeResult<()> {
        let id = id.into();
        self.path(&id)?;
        self.active = Some(id);
        Ok(())
    }

    // ================================================================
    // Selection
    // ================================================================

    pub fn select(&mut self, id: impl Into<ItemId>) -> TreeResult<()> {
        let id = id.into();
        self.path(&id)?;
        self.selection.insert(id);
        Ok(())
    }

    /// Returns false if `id` was not selected.
    pub fn deselect(&mut self, id: &ItemId) -> bool {
        self.selection.remove(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    #[must_use]
    pub fn selected(&self) -> &[ItemId] {
        self.selection.as_slice()
    }

    // ================================================================
    // Moving
    // ================================================================

    pub fn move_up(
        &mut self,
        host: &mut dyn ModifierHost,
        id: impl Into<ItemId>,
    ) -> TreeResult<()> {
        self.move_item(host, id.into(), Direction::Up)
    }

    pub fn move_down(
        &mut self,
        host: &mut dyn ModifierHost,
        id: impl Into<ItemId>,
    ) -> TreeResult<()> {
        self.move_item(host, id.into(), Direction::Down)
    }

    /// Swaps an item with its neighbor. Inside a fixed cluster the move
    /// applies to the nearest ancestor that may be reordered.
    fn move_item(
        &mut self,
        host: &mut dyn ModifierHost,
        id: ItemId,
        direction: Direction,
    ) -> TreeResult<()> {
        let path = self.open_path(&id)?;
        let (&pos, parent) = path
            .split_last()
            .ok_or_else(|| TreeError::NotFound(id.clone()))?;
        let siblings =
            members_at(self.root.items(), parent).ok_or_else(|| TreeError::NotFound(id.clone()))?;
        let neighbor = match direction {
            Direction::Up => pos.checked_sub(1),
            Direction::Down => Some(pos + 1).filter(|&p| p < siblings.len()),
        }
        .ok_or_else(|| TreeError::AtBoundary(id.clone()))?;

        let moving = names_of(&siblings[pos]);
        let steps = siblings[neighbor].primitive_count();
        debug!(
            item = %ItemId::of(&siblings[pos]),
            direction = ?direction,
            steps,
            "moving"
        );

        let mut next = self.root.clone();
        edit_at(next.items_mut(), parent, |items| items.swap(pos, neighbor))
            .ok_or_else(|| TreeError::NotFound(id.clone()))?;
        let result = move_on_host(host, &moving, steps, direction);
        self.commit(host, next, result)
    }

    // ================================================================
    // Removing / Applying
    // ================================================================

    /// Removes an item and its primitives. Inside a fixed cluster the
    /// removal applies to the nearest ancestor that may lose members.
    pub fn remove(&mut self, host: &mut dyn ModifierHost, id: impl Into<ItemId>) -> TreeResult<()> {
        let id = id.into();
        let path = self.open_path(&id)?;
        let (&pos, parent) = path
            .split_last()
            .ok_or_else(|| TreeError::NotFound(id.clone()))?;
        let target =
            item_at(self.root.items(), &path).ok_or_else(|| TreeError::NotFound(id.clone()))?;
        let names = names_of(target);
        info!(item = %ItemId::of(target), primitives = names.len(), "removing");

        let mut next = self.root.clone();
        edit_at(next.items_mut(), parent, |items| {
            items.remove(pos);
        })
        .ok_or_else(|| TreeError::NotFound(id.clone()))?;
        let result = names.iter().try_for_each(|n| host.primitive_remove(n));
        self.commit(host, next, result)
    }

    /// Bakes an item's primitives in stack order and drops the item. Any
    /// ancestor left not fitting its type is dissolved into its own owner.
    pub fn apply(&mut self, host: &mut dyn ModifierHost, id: impl Into<ItemId>) -> TreeResult<()> {
        let id = id.into();
        let path = self.path(&id)?;
        let (&pos, parent) = path
            .split_last()
            .ok_or_else(|| TreeError::NotFound(id.clone()))?;
        let target =
            item_at(self.root.items(), &path).ok_or_else(|| TreeError::NotFound(id.clone()))?;
        let names = names_of(target);
        info!(item = %id, primitives = names.len(), "applying");

        let mut next = self.root.clone();
        edit_at(next.items_mut(), parent, |items| {
            items.remove(pos);
        })
        .ok_or_else(|| TreeError::NotFound(id.clone()))?;
        let result = names.iter().try_for_each(|n| host.primitive_apply(n));
        self.commit(host, next, result)
    }

    // ================================================================
    // Constructing / Deconstructing
    // ================================================================

    /// Groups adjacent sibling items into clusters in place.
    ///
    /// Fails without changing anything if the items are not adjacent
    /// siblings of an owner that accepts new members, or if no cluster type
    /// fits them.
    pub fn construct_from_selection(
        &mut self,
        host: &dyn ModifierHost,
        ids: &[ItemId],
    ) -> TreeResult<()> {
        if ids.is_empty() {
            return Err(TreeError::EmptySelection);
        }
        let mut paths = ids
            .iter()
            .map(|id| self.path(id))
            .collect::<TreeResult<Vec<_>>>()?;
        paths.sort();
        paths.dedup();

        let parent = paths[0][..paths[0].len() - 1].to_vec();
        if paths.iter().any(|p| p[..p.len() - 1] != parent[..]) {
            return Err(TreeError::InvalidSelection(
                "items do not share an owner".into(),
            ));
        }
        let first = paths[0][parent.len()];
        let count = paths.len();
        if paths
            .iter()
            .enumerate()
            .any(|(i, p)| p[parent.len()] != first + i)
        {
            return Err(TreeError::InvalidSelection("items are not adjacent".into()));
        }
        if !self.is_open(&parent) {
            return Err(TreeError::InvalidSelection(
                "items belong to a fixed cluster".into(),
            ));
        }

        let siblings = members_at(self.root.items(), &parent)
            .ok_or_else(|| TreeError::InvalidSelection("owner vanished".into()))?;
        let subset = siblings[first..first + count].to_vec();
        let grouped = self.group(subset)?;

        let mut next = self.root.clone();
        edit_at(next.items_mut(), &parent, |items| {
            items.splice(first..first + count, grouped);
        })
        .ok_or_else(|| TreeError::InvalidSelection("owner vanished".into()))?;
        info!(items = count, "constructed clusters from selection");
        self.commit(host, next, Ok(()))
    }

    /// [`ClusterTree::construct_from_selection`] over the current selection.
    pub fn construct_selected(&mut self, host: &dyn ModifierHost) -> TreeResult<()> {
        let ids = self.selection.as_slice().to_vec();
        self.construct_from_selection(host, &ids)?;
        self.selection.clear();
        Ok(())
    }

    /// Parses `subset` with the catalog; fails if nothing new was grouped.
    fn group(&mut self, subset: Vec<Item>) -> TreeResult<Vec<Item>> {
        let before = cluster_count(&subset);
        let mut diagnostics = Diagnostics::new();
        let mut items = subset;
        if items.iter().any(|i| !i.is_cluster()) {
            let outcome = self
                .parser
                .parse(items, Candidates::clusters(&self.catalog).as_slice())?;
            diagnostics.extend(outcome.diagnostics.clone());
            items = outcome.into_items();
        }
        let layered = self
            .parser
            .parse_recursively(items, Candidates::layers(&self.catalog).as_slice())?;
        diagnostics.extend(layered.diagnostics);
        self.diagnostics = diagnostics;

        if cluster_count(&layered.items) == before {
            return Err(TreeError::NoChange(
                "no cluster type fits the selection".into(),
            ));
        }
        Ok(layered.items)
    }

    /// Replaces a cluster with the result of re-parsing its members with
    /// every catalog type except its own.
    pub fn deconstruct(
        &mut self,
        host: &dyn ModifierHost,
        id: impl Into<ItemId>,
    ) -> TreeResult<()> {
        let id = id.into();
        let path = self.path(&id)?;
        let (&pos, parent) = path
            .split_last()
            .ok_or_else(|| TreeError::NotFound(id.clone()))?;
        if !self.is_open(parent) {
            return Err(TreeError::InvalidSelection(
                "cluster belongs to a fixed cluster".into(),
            ));
        }
        let cluster = item_at(self.root.items(), &path)
            .and_then(Item::as_cluster)
            .ok_or_else(|| TreeError::NotACluster(id.clone()))?;
        let own = cluster.definition().default_name.clone();
        let index = cluster.index();
        let members = cluster.members().to_vec();

        let items = if cluster.is_layer() {
            let candidates = Candidates::layers(&self.catalog).excluding(&own);
            let layered = self.parser.parse_recursively(members, candidates.as_slice())?;
            self.diagnostics = layered.diagnostics;
            layered.items
        } else {
            let candidates = Candidates::clusters(&self.catalog).excluding(&own);
            let outcome = self.parser.parse(members, candidates.as_slice())?;
            self.diagnostics = outcome.diagnostics.clone();
            outcome.into_items()
        };
        if let [Item::Cluster(only)] = items.as_slice()
            && only.definition().default_name == own
        {
            return Err(TreeError::NoChange(format!("'{own}' re-forms itself")));
        }

        let mut next = self.root.clone();
        edit_at(next.items_mut(), parent, |siblings| {
            siblings.splice(pos..=pos, items);
        })
        .ok_or_else(|| TreeError::NotFound(id.clone()))?;
        info!(cluster = %own, index = %index, "deconstructed");
        self.commit(host, next, Ok(()))
    }

    // ================================================================
    // Names / Tags
    // ================================================================

    /// Sets or clears (with `None` or an empty name) a cluster's custom name.
    pub fn rename(&mut self, index: ClusterIndex, name: Option<String>) -> TreeResult<()> {
        let cluster = self
            .root
            .find_mut(index)
            .ok_or(TreeError::NotFound(ItemId::Cluster(index)))?;
        cluster.set_custom_name(name.filter(|n| !n.is_empty()));
        Ok(())
    }

    pub fn set_tag(&mut self, index: ClusterIndex, tag: &str, on: bool) -> TreeResult<()> {
        let cluster = self
            .root
            .find_mut(index)
            .ok_or(TreeError::NotFound(ItemId::Cluster(index)))?;
        cluster.set_tag(tag, on);
        Ok(())
    }

    // ================================================================
    // Creating
    // ================================================================

    /// Creates fresh primitives for a catalog type at the bottom of the
    /// stack and groups them as one new cluster.
    ///
    /// Only creatable leaf types whose every slot names exactly one type tag
    /// can be created. Primitives created before a failure are removed again.
    pub fn add_cluster(
        &mut self,
        host: &mut dyn ModifierHost,
        default_name: &str,
    ) -> TreeResult<ClusterIndex> {
        let definition = Arc::clone(
            self.catalog
                .lookup_by_name(default_name)
                .ok_or_else(|| TreeError::UnknownDefinition(default_name.to_string()))?,
        );
        if !definition.creatable || definition.is_layer {
            return Err(TreeError::NotCreatable(default_name.to_string()));
        }
        let types = definition
            .pattern
            .iter()
            .map(|slot| slot.single().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| TreeError::NotCreatable(default_name.to_string()))?;

        let mut created = Vec::with_capacity(types.len());
        for type_tag in &types {
            match host.primitive_create(&type_tag.to_lowercase(), type_tag) {
                Ok(primitive) => created.push(primitive),
                Err(error) => {
                    undo_create(host, &created);
                    return Err(error.into());
                }
            }
        }

        let cluster = match self.instantiate_created(definition, &created) {
            Ok(cluster) => cluster,
            Err(error) => {
                undo_create(host, &created);
                return Err(error);
            }
        };
        let index = cluster.index();
        info!(cluster = %cluster.name(), index = %index, "added cluster");

        let mut next = self.root.clone();
        next.items_mut().push(cluster.into());
        self.commit(host, next, Ok(()))?;
        Ok(index)
    }

    fn instantiate_created(
        &mut self,
        definition: Arc<ClusterTypeDefinition>,
        created: &[Primitive],
    ) -> TreeResult<Cluster> {
        let items = bare_items(created.iter().cloned());
        if !check_availability(&definition, &items).is_match() {
            return Err(TreeError::NotCreatable(definition.default_name.clone()));
        }
        Ok(self.parser.instantiate(definition, items)?)
    }

    // ================================================================
    // Persistence
    // ================================================================

    /// Stores the layout and a stack snapshot on the host object.
    pub fn save_state(&self, host: &mut dyn ModifierHost) -> TreeResult<()> {
        let state = save(self.root.items());
        host.persisted_property_set(&self.config.state_key, state.to_json()?)?;
        let snapshot = StackSnapshot::capture(&host.primitive_list());
        host.persisted_property_set(&self.config.snapshot_key, snapshot.to_json()?)?;
        debug!(entries = state.entries.len(), "saved layout");
        Ok(())
    }

    /// Rebuilds the tree from the layout stored on the host object.
    ///
    /// Records that no longer fit are reported as warnings in
    /// [`ClusterTree::diagnostics`]; their primitives are parsed afresh.
    pub fn load_state(&mut self, host: &dyn ModifierHost) -> TreeResult<()> {
        let json = host
            .persisted_property_get(&self.config.state_key)
            .ok_or(TreeError::NoState)?;
        let state = PersistedState::from_json(&json)?;
        let mut restored = restore(&mut self.parser, &state, &self.catalog, host.primitive_list())?;
        let cleaned = cleanup(&mut restored.layer, &self.catalog);

        let mut diagnostics = restored.diagnostics;
        for rejected in &restored.rejected {
            diagnostics.warn(format!(
                "could not restore '{}': {}",
                rejected.display_name, rejected.error
            ));
        }
        self.diagnostics = diagnostics;
        self.install(restored.layer);
        info!(
            restored = cleaned,
            rejected = restored.rejected.len(),
            "loaded layout"
        );
        Ok(())
    }

    // ================================================================
    // Paths
    // ================================================================

    fn path(&self, id: &ItemId) -> TreeResult<Vec<usize>> {
        locate(self.root.items(), id).ok_or_else(|| TreeError::NotFound(id.clone()))
    }

    /// Path of the item an edit of `id` lands on: the item itself, or its
    /// nearest ancestor whose owner accepts reordering and removal.
    fn open_path(&self, id: &ItemId) -> TreeResult<Vec<usize>> {
        let mut path = self.path(id)?;
        while path.len() > 1 && !self.is_open(&path[..path.len() - 1]) {
            path.pop();
        }
        Ok(path)
    }

    /// The top level and dynamic clusters accept reordering and removal.
    fn is_open(&self, parent: &[usize]) -> bool {
        parent.is_empty()
            || item_at(self.root.items(), parent)
                .and_then(Item::as_cluster)
                .is_some_and(Cluster::is_dynamic)
    }
}

fn locate(items: &[Item], id: &ItemId) -> Option<Vec<usize>> {
    for (pos, item) in items.iter().enumerate() {
        if id.matches(item) {
            return Some(vec![pos]);
        }
        if let Item::Cluster(c) = item
            && let Some(mut rest) = locate(c.members(), id)
        {
            rest.insert(0, pos);
            return Some(rest);
        }
    }
    None
}

fn members_at<'a>(items: &'a [Item], parent: &[usize]) -> Option<&'a [Item]> {
    let mut members = items;
    for &pos in parent {
        members = members.get(pos)?.as_cluster()?.members();
    }
    Some(members)
}

fn item_at<'a>(items: &'a [Item], path: &[usize]) -> Option<&'a Item> {
    let (&last, parent) = path.split_last()?;
    members_at(items, parent)?.get(last)
}

fn names_of(item: &Item) -> Vec<String> {
    item.primitives().into_iter().map(|p| p.name.clone()).collect()
}

fn cluster_count(items: &[Item]) -> usize {
    items
        .iter()
        .filter_map(Item::as_cluster)
        .map(|c| 1 + c.clusters().len())
        .sum()
}

/// Applies `edit` to the member list at `parent`, then settles every
/// cluster on the way back up.
fn edit_at<R>(
    items: &mut Vec<Item>,
    parent: &[usize],
    edit: impl FnOnce(&mut Vec<Item>) -> R,
) -> Option<R> {
    let Some((&first, rest)) = parent.split_first() else {
        return Some(edit(items));
    };
    let mut members = items.get(first)?.as_cluster()?.members().to_vec();
    let result = edit_at(&mut members, rest, edit)?;
    settle(items, first, members);
    Some(result)
}

/// Gives the cluster at `pos` its edited members. An emptied cluster is
/// dropped; a fixed cluster the new members no longer fit is dissolved into
/// `items`.
fn settle(items: &mut Vec<Item>, pos: usize, members: Vec<Item>) {
    let Some(Item::Cluster(cluster)) = items.get_mut(pos) else {
        return;
    };
    if members.is_empty() {
        debug!(cluster = %cluster.name(), "dropping emptied cluster");
        items.remove(pos);
        return;
    }
    if cluster.is_dynamic() {
        if cluster.set_members(members.clone()).is_ok() {
            return;
        }
    } else if members.len() == cluster.members().len()
        && check_availability(cluster.definition(), &members).is_match()
    {
        for (slot, member) in cluster.children_mut().iter_mut().zip(members) {
            *slot = member;
        }
        return;
    }
    debug!(cluster = %cluster.name(), "dissolving cluster that no longer fits");
    items.splice(pos..=pos, members);
}

/// Moves `names` past `steps` neighboring primitives, one step at a time.
fn move_on_host(
    host: &mut dyn ModifierHost,
    names: &[String],
    steps: usize,
    direction: Direction,
) -> HostResult<()> {
    let ordered: Vec<&String> = match direction {
        Direction::Up => names.iter().collect(),
        Direction::Down => names.iter().rev().collect(),
    };
    for name in ordered {
        for _ in 0..steps {
            host.primitive_move(name, direction)?;
        }
    }
    Ok(())
}

fn undo_create(host: &mut dyn ModifierHost, created: &[Primitive]) {
    for primitive in created.iter().rev() {
        if let Err(error) = host.primitive_remove(&primitive.name) {
            warn!(primitive = %primitive, error = %error, "could not remove created primitive");
        }
    }
}
