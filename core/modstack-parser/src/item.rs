use crate::{Cluster, HasMembers};
use modstack_types::{MemberView, Primitive};

/// One unit the parser works on: a bare primitive or an already-formed cluster.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Primitive(Primitive),
    Cluster(Cluster),
}

impl Item {
    /// Reported name; clusters follow their display rules.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(p) => &p.name,
            Self::Cluster(c) => c.name(),
        }
    }

    /// Primitive type, or the cluster's type tag.
    #[must_use]
    pub fn type_tag(&self) -> &str {
        match self {
            Self::Primitive(p) => &p.type_tag,
            Self::Cluster(c) => c.type_tag(),
        }
    }

    #[must_use]
    pub fn is_cluster(&self) -> bool {
        matches!(self, Self::Cluster(_))
    }

    #[must_use]
    pub fn as_cluster(&self) -> Option<&Cluster> {
        match self {
            Self::Cluster(c) => Some(c),
            Self::Primitive(_) => None,
        }
    }

    pub fn as_cluster_mut(&mut self) -> Option<&mut Cluster> {
        match self {
            Self::Cluster(c) => Some(c),
            Self::Primitive(_) => None,
        }
    }

    #[must_use]
    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Primitive(p) => Some(p),
            Self::Cluster(_) => None,
        }
    }

    #[must_use]
    pub fn view(&self) -> MemberView<'_> {
        MemberView {
            name: self.name(),
            type_tag: self.type_tag(),
            is_cluster: self.is_cluster(),
        }
    }

    /// Appends every primitive this item transitively holds, in stack order.
    pub fn collect_primitives<'a>(&'a self, out: &mut Vec<&'a Primitive>) {
        match self {
            Self::Primitive(p) => out.push(p),
            Self::Cluster(c) => {
                for member in c.members() {
                    member.collect_primitives(out);
                }
            }
        }
    }

    #[must_use]
    pub fn primitives(&self) -> Vec<&Primitive> {
        let mut out = Vec::new();
        self.collect_primitives(&mut out);
        out
    }

    /// Topmost primitive this item holds.
    #[must_use]
    pub fn first_primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Primitive(p) => Some(p),
            Self::Cluster(c) => c.members().first().and_then(Item::first_primitive),
        }
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        match self {
            Self::Primitive(_) => 1,
            Self::Cluster(c) => c.members().iter().map(Item::primitive_count).sum(),
        }
    }
}

impl From<Primitive> for Item {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

impl From<Cluster> for Item {
    fn from(c: Cluster) -> Self {
        Self::Cluster(c)
    }
}

/// Every primitive reachable from `items`, in stack order.
#[must_use]
pub fn flatten(items: &[Item]) -> Vec<&Primitive> {
    let mut out = Vec::new();
    for item in items {
        item.collect_primitives(&mut out);
    }
    out
}

/// Sorted copy of the reachable primitives; equal multisets compare equal.
#[must_use]
pub fn primitive_multiset(items: &[Item]) -> Vec<Primitive> {
    let mut all: Vec<Primitive> = flatten(items).into_iter().cloned().collect();
    all.sort();
    all
}

/// Wraps primitives as bare items.
#[must_use]
pub fn bare_items(primitives: impl IntoIterator<Item = Primitive>) -> Vec<Item> {
    primitives.into_iter().map(Item::Primitive).collect()
}
