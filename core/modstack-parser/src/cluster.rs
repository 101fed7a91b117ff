//! Instantiated clusters and the member-holding capability they share with
//! the outermost layer.

use crate::{Item, ParseError, ParseResult};
use modstack_catalog::ClusterTypeDefinition;
use modstack_types::{ClusterIndex, Primitive};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Anything that owns an ordered list of items.
///
/// Ownership is strictly downward: nothing points back at its owner, so
/// "who owns cluster X" is answered by searching from the top with
/// [`HasMembers::path_to`].
pub trait HasMembers {
    fn members(&self) -> &[Item];

    /// Mutable access to members without changing their number or order.
    fn children_mut(&mut self) -> &mut [Item];

    /// Child positions leading from `self` to the cluster with `index`.
    fn path_to(&self, index: ClusterIndex) -> Option<Vec<usize>> {
        for (pos, item) in self.members().iter().enumerate() {
            if let Item::Cluster(c) = item {
                if c.index() == index {
                    return Some(vec![pos]);
                }
                if let Some(mut rest) = c.path_to(index) {
                    rest.insert(0, pos);
                    return Some(rest);
                }
            }
        }
        None
    }

    fn find(&self, index: ClusterIndex) -> Option<&Cluster> {
        let path = self.path_to(index)?;
        let (last, parents) = path.split_last()?;
        let mut members = self.members();
        for &pos in parents {
            members = members.get(pos)?.as_cluster()?.members();
        }
        members.get(*last)?.as_cluster()
    }

    fn find_mut(&mut self, index: ClusterIndex) -> Option<&mut Cluster> {
        let path = self.path_to(index)?;
        let mut children = self.children_mut();
        let (last, parents) = path.split_last()?;
        for &pos in parents {
            children = children.get_mut(pos)?.as_cluster_mut()?.children_mut();
        }
        children.get_mut(*last)?.as_cluster_mut()
    }

    /// Every primitive reachable from here, in stack order.
    fn primitives(&self) -> Vec<&Primitive> {
        crate::flatten(self.members())
    }

    /// Every cluster reachable from here, depth-first in stack order.
    fn clusters(&self) -> Vec<&Cluster> {
        let mut out = Vec::new();
        for item in self.members() {
            if let Item::Cluster(c) = item {
                out.push(c);
                out.extend(c.clusters());
            }
        }
        out
    }
}

/// A grouping instantiated from a [`ClusterTypeDefinition`].
#[derive(Debug, Clone)]
pub struct Cluster {
    definition: Arc<ClusterTypeDefinition>,
    members: Vec<Item>,
    custom_name: Option<String>,
    custom_tags: BTreeSet<String>,
    index: ClusterIndex,
    initialized: bool,
}

impl Cluster {
    /// Creates an empty, uninitialized cluster. Adopts the definition's
    /// instance name, if it carries one.
    #[must_use]
    pub fn new(definition: Arc<ClusterTypeDefinition>, index: ClusterIndex) -> Self {
        Self {
            custom_name: definition.instance_name.clone(),
            definition,
            members: Vec::new(),
            custom_tags: BTreeSet::new(),
            index,
            initialized: false,
        }
    }

    /// Sets the member list.
    ///
    /// Succeeds once, or any number of times for dynamic definitions. A fixed
    /// definition also requires exactly one member per pattern slot. On error
    /// the current members are left untouched.
    pub fn set_members(&mut self, members: Vec<Item>) -> ParseResult<()> {
        if self.initialized && !self.definition.dynamic {
            return Err(ParseError::MembershipFrozen(self.index));
        }
        if !self.definition.dynamic && !self.definition.force_sane {
            let expected = self.definition.len();
            if members.len() != expected {
                return Err(ParseError::MemberCountMismatch {
                    name: self.definition.default_name.clone(),
                    expected,
                    found: members.len(),
                });
            }
        }
        if let Some(bad) = members
            .iter()
            .find(|m| m.is_cluster() != self.definition.is_layer)
        {
            return Err(ParseError::InvalidMember {
                name: self.definition.default_name.clone(),
                member: bad.name().to_string(),
            });
        }
        self.members = members;
        self.initialized = true;
        Ok(())
    }

    /// Consumes the cluster, handing back its members.
    #[must_use]
    pub fn into_members(self) -> Vec<Item> {
        self.members
    }

    #[must_use]
    pub fn definition(&self) -> &Arc<ClusterTypeDefinition> {
        &self.definition
    }

    /// Swaps the template, e.g. to drop restoration data once a reload is done.
    pub fn set_definition(&mut self, definition: Arc<ClusterTypeDefinition>) {
        self.definition = definition;
    }

    #[must_use]
    pub fn index(&self) -> ClusterIndex {
        self.index
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn is_layer(&self) -> bool {
        self.definition.is_layer
    }

    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.definition.dynamic
    }

    /// The lone primitive of an untagged single-member cluster.
    fn transparent_member(&self) -> Option<&Primitive> {
        match self.members.as_slice() {
            [Item::Primitive(p)] if self.custom_tags.is_empty() => Some(p),
            _ => None,
        }
    }

    /// Custom name, else the lone primitive's name, else the default name.
    #[must_use]
    pub fn name(&self) -> &str {
        if let Some(name) = &self.custom_name {
            return name;
        }
        match self.transparent_member() {
            Some(p) => &p.name,
            None => &self.definition.default_name,
        }
    }

    #[must_use]
    pub fn type_tag(&self) -> &str {
        match self.transparent_member() {
            Some(p) => &p.type_tag,
            None => &self.definition.type_tag,
        }
    }

    #[must_use]
    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    pub fn set_custom_name(&mut self, name: Option<String>) {
        self.custom_name = name;
    }

    #[must_use]
    pub fn custom_tags(&self) -> &BTreeSet<String> {
        &self.custom_tags
    }

    /// Adds or removes a custom tag.
    pub fn set_tag(&mut self, tag: impl Into<String>, on: bool) {
        let tag = tag.into();
        if on {
            self.custom_tags.insert(tag);
        } else {
            self.custom_tags.remove(&tag);
        }
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.custom_tags.contains(tag)
    }

    /// Whether `index` is this cluster or lies beneath it.
    #[must_use]
    pub fn contains(&self, index: ClusterIndex) -> bool {
        self.index == index || self.path_to(index).is_some()
    }
}

impl HasMembers for Cluster {
    fn members(&self) -> &[Item] {
        &self.members
    }

    fn children_mut(&mut self) -> &mut [Item] {
        &mut self.members
    }
}

impl PartialEq for Cluster {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.definition.default_name == other.definition.default_name
            && self.definition.index == other.definition.index
            && self.custom_name == other.custom_name
            && self.custom_tags == other.custom_tags
            && self.initialized == other.initialized
            && self.members == other.members
    }
}

/// The outermost list of an object's items.
///
/// Unlike clusters, the outermost layer always permits removal, insertion and
/// reordering of its children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLayer {
    items: Vec<Item>,
}

impl ParsedLayer {
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl HasMembers for ParsedLayer {
    fn members(&self) -> &[Item] {
        &self.items
    }

    fn children_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }
}
