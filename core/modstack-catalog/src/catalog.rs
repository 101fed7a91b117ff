use crate::{CatalogError, CatalogResult, ClusterTypeDefinition, default_definitions};
use modstack_types::{DefinitionIndex, IndexAllocator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// On-disk form of a catalog: a flat list of definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub definitions: Vec<ClusterTypeDefinition>,
}

/// Registry of cluster type definitions.
///
/// Leaf cluster types and layer types are kept apart because the parser
/// consults them in different passes. Registration order is preserved and is
/// the final tie-breaker between otherwise equal candidates.
#[derive(Debug, Clone)]
pub struct Catalog {
    clusters: Vec<Arc<ClusterTypeDefinition>>,
    layers: Vec<Arc<ClusterTypeDefinition>>,
    indices: IndexAllocator,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clusters: Vec::new(),
            layers: Vec::new(),
            indices: IndexAllocator::new(),
        }
    }

    /// Creates a catalog holding the stock definitions.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for definition in default_definitions() {
            if let Err(error) = catalog.register(definition, false) {
                warn!(error = %error, "stock cluster type rejected");
                debug_assert!(false, "stock cluster type rejected: {error}");
            }
        }
        catalog
    }

    /// Builds a catalog from the JSON form of [`CatalogFile`].
    pub fn from_file_contents(json: &str, replace: bool) -> CatalogResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for definition in file.definitions {
            catalog.register(definition, replace)?;
        }
        Ok(catalog)
    }

    /// Serializes every definition in registration order.
    pub fn to_file_contents(&self) -> CatalogResult<String> {
        let file = CatalogFile {
            definitions: self.iter().map(|d| d.as_ref().clone()).collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Registers a definition and returns its fresh index.
    ///
    /// Fails without touching the catalog when the definition is not sane, or
    /// when its default name is taken and `replace` is off. With `replace` on,
    /// the existing definition is swapped out in place.
    pub fn register(
        &mut self,
        mut definition: ClusterTypeDefinition,
        replace: bool,
    ) -> CatalogResult<DefinitionIndex> {
        definition.normalize();
        definition
            .check_sanity()
            .map_err(|reason| CatalogError::InsaneDefinition {
                name: definition.default_name.clone(),
                reason,
            })?;

        let existing = self.position(&definition.default_name);
        if existing.is_some() && !replace {
            return Err(CatalogError::DuplicateName(definition.default_name));
        }

        let index = self.indices.next_definition();
        definition.index = index;
        debug!(
            name = %definition.default_name,
            index = %index,
            layer = definition.is_layer,
            "registering cluster type"
        );

        let definition = Arc::new(definition);
        match existing {
            Some((was_layer, pos)) if was_layer == definition.is_layer => {
                self.bucket_mut(was_layer)[pos] = definition;
            }
            Some((was_layer, pos)) => {
                self.bucket_mut(was_layer).remove(pos);
                self.bucket_mut(definition.is_layer).push(definition);
            }
            None => self.bucket_mut(definition.is_layer).push(definition),
        }
        Ok(index)
    }

    /// Removes a definition by default name.
    pub fn unregister(&mut self, default_name: &str) -> CatalogResult<Arc<ClusterTypeDefinition>> {
        let (is_layer, pos) = self
            .position(default_name)
            .ok_or_else(|| CatalogError::NotFound(default_name.to_string()))?;
        Ok(self.bucket_mut(is_layer).remove(pos))
    }

    /// First definition with this default name.
    #[must_use]
    pub fn lookup_by_name(&self, default_name: &str) -> Option<&Arc<ClusterTypeDefinition>> {
        self.iter().find(|d| d.default_name == default_name)
    }

    /// First definition with this type tag.
    #[must_use]
    pub fn lookup_by_type_tag(&self, type_tag: &str) -> Option<&Arc<ClusterTypeDefinition>> {
        self.iter().find(|d| d.type_tag == type_tag)
    }

    /// Definition with this registration index.
    #[must_use]
    pub fn get(&self, index: DefinitionIndex) -> Option<&Arc<ClusterTypeDefinition>> {
        self.iter().find(|d| d.index == index)
    }

    /// Leaf cluster types, in registration order.
    #[must_use]
    pub fn cluster_types(&self) -> &[Arc<ClusterTypeDefinition>] {
        &self.clusters
    }

    /// Layer types, in registration order.
    #[must_use]
    pub fn layer_types(&self) -> &[Arc<ClusterTypeDefinition>] {
        &self.layers
    }

    /// All definitions: leaf types first, then layer types.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ClusterTypeDefinition>> {
        self.clusters.iter().chain(self.layers.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len() + self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn position(&self, default_name: &str) -> Option<(bool, usize)> {
        if let Some(pos) = self.clusters.iter().position(|d| d.default_name == default_name) {
            return Some((false, pos));
        }
        self.layers
            .iter()
            .position(|d| d.default_name == default_name)
            .map(|pos| (true, pos))
    }

    fn bucket_mut(&mut self, is_layer: bool) -> &mut Vec<Arc<ClusterTypeDefinition>> {
        if is_layer {
            &mut self.layers
        } else {
            &mut self.clusters
        }
    }
}
