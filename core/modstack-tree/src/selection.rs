//! Addressing items and remembering which ones are selected.

use modstack_parser::Item;
use modstack_types::ClusterIndex;
use std::fmt;

/// Stable address of an item in the tree: clusters by index, primitives by
/// their (object-unique) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemId {
    Cluster(ClusterIndex),
    Primitive(String),
}

impl ItemId {
    #[must_use]
    pub fn of(item: &Item) -> Self {
        match item {
            Item::Primitive(p) => Self::Primitive(p.name.clone()),
            Item::Cluster(c) => Self::Cluster(c.index()),
        }
    }

    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        match (self, item) {
            (Self::Cluster(index), Item::Cluster(c)) => c.index() == *index,
            (Self::Primitive(name), Item::Primitive(p)) => p.name == *name,
            _ => false,
        }
    }
}

impl From<ClusterIndex> for ItemId {
    fn from(index: ClusterIndex) -> Self {
        Self::Cluster(index)
    }
}

impl From<&str> for ItemId {
    fn from(name: &str) -> Self {
        Self::Primitive(name.to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cluster(index) => write!(f, "cluster {index}"),
            Self::Primitive(name) => write!(f, "primitive '{name}'"),
        }
    }
}

/// Selected items in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<ItemId>,
}

impl Selection {
    /// Adds `id`; returns false if it was already selected.
    pub fn insert(&mut self, id: ItemId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.items.push(id);
        true
    }

    /// Removes `id`; returns false if it was not selected.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drops every id `keep` rejects.
    pub fn retain(&mut self, keep: impl FnMut(&ItemId) -> bool) {
        self.items.retain(keep);
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains(id)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ItemId] {
        &self.items
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_order_and_ignores_repeats() {
        let mut selection = Selection::default();
        assert!(selection.insert("b".into()));
        assert!(selection.insert(ClusterIndex::new(3).into()));
        assert!(!selection.insert("b".into()));
        assert_eq!(
            selection.as_slice(),
            &[ItemId::from("b"), ItemId::Cluster(ClusterIndex::new(3))]
        );
    }

    #[test]
    fn remove_reports_presence() {
        let mut selection = Selection::default();
        selection.insert("a".into());
        assert!(selection.remove(&"a".into()));
        assert!(!selection.remove(&"a".into()));
        assert!(selection.is_empty());
    }
}
