use crate::ExtraCheck;
use modstack_types::{Constraint, DefinitionIndex, TAG_RESTORED};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Immutable template describing one recognizable cluster shape.
///
/// `pattern` and `name_pattern` run in parallel: position `i` of a candidate
/// sequence must satisfy both. A definition reconstructed from persisted state
/// additionally carries `name_overrides` (exact member names, one per slot),
/// `member_anchors` (the first primitive of each recorded member) and an
/// `instance_name` that instances created from it adopt.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClusterTypeDefinition {
    pub default_name: String,
    pub type_tag: String,
    /// Higher wins when two candidates of equal length both match.
    #[serde(default)]
    pub priority: i32,
    pub pattern: Vec<Constraint>,
    /// Filled with wildcards on load when omitted.
    #[serde(default)]
    pub name_pattern: Vec<Constraint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_overrides: Option<Vec<String>>,
    /// Name of the first primitive each member must start with. Primitive
    /// names are unique, so an anchored definition fits one place only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_anchors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
    /// Whether fresh instances (with newly created primitives) may be made.
    #[serde(default = "default_true")]
    pub creatable: bool,
    /// Whether an instance's member list may be replaced after creation.
    #[serde(default)]
    pub dynamic: bool,
    /// Groups clusters rather than primitives.
    #[serde(default)]
    pub is_layer: bool,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Skips the sanity check entirely.
    #[serde(default)]
    pub force_sane: bool,
    /// Assigned by the catalog on registration.
    #[serde(default)]
    pub index: DefinitionIndex,
    #[serde(skip)]
    pub check: Option<Arc<dyn ExtraCheck>>,
}

fn default_true() -> bool {
    true
}

impl ClusterTypeDefinition {
    /// Creates a leaf definition from a type pattern; every name slot is a wildcard.
    pub fn new(
        default_name: impl Into<String>,
        type_tag: impl Into<String>,
        pattern: Vec<Constraint>,
    ) -> Self {
        let name_pattern = vec![Constraint::Any; pattern.len()];
        Self {
            default_name: default_name.into(),
            type_tag: type_tag.into(),
            priority: 0,
            pattern,
            name_pattern,
            name_overrides: None,
            member_anchors: None,
            instance_name: None,
            creatable: true,
            dynamic: false,
            is_layer: false,
            tags: BTreeSet::new(),
            force_sane: false,
            index: DefinitionIndex::default(),
            check: None,
        }
    }

    /// Shorthand for a pattern where every slot admits exactly one type tag.
    pub fn sequence(
        default_name: impl Into<String>,
        type_tag: impl Into<String>,
        types: &[&str],
    ) -> Self {
        let pattern = types.iter().map(|t| Constraint::exactly(*t)).collect();
        Self::new(default_name, type_tag, pattern)
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Replaces the name pattern.
    #[must_use]
    pub fn with_names(mut self, name_pattern: Vec<Constraint>) -> Self {
        self.name_pattern = name_pattern;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    #[must_use]
    pub fn with_check(mut self, check: impl ExtraCheck + 'static) -> Self {
        self.check = Some(Arc::new(check));
        self
    }

    /// Marks this definition as grouping clusters.
    #[must_use]
    pub fn layer(mut self) -> Self {
        self.is_layer = true;
        self
    }

    #[must_use]
    pub fn dynamic(mut self) -> Self {
        self.dynamic = true;
        self
    }

    #[must_use]
    pub fn not_creatable(mut self) -> Self {
        self.creatable = false;
        self
    }

    #[must_use]
    pub fn force_sane(mut self) -> Self {
        self.force_sane = true;
        self
    }

    /// Number of members a full match consumes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    #[must_use]
    pub fn is_restored(&self) -> bool {
        self.has_tag(TAG_RESTORED)
    }

    /// The name constraint at `position`, with explicit overrides taking precedence.
    #[must_use]
    pub fn name_constraint(&self, position: usize) -> Option<Constraint> {
        match &self.name_overrides {
            Some(names) => names.get(position).map(|n| Constraint::exactly(n.as_str())),
            None => self.name_pattern.get(position).cloned(),
        }
    }

    /// Returns true if `name` satisfies the (override-resolved) name slot at
    /// `position`. Slots past the end of a forced definition are wildcards.
    #[must_use]
    pub fn admits_name(&self, position: usize, name: &str) -> bool {
        match &self.name_overrides {
            Some(names) => names.get(position).is_none_or(|n| n == name),
            None => self
                .name_pattern
                .get(position)
                .is_none_or(|c| c.admits(name)),
        }
    }

    /// Returns true if a member whose first primitive is `first` may sit at
    /// `position`. Unanchored definitions admit anything.
    #[must_use]
    pub fn admits_anchor(&self, position: usize, first: Option<&str>) -> bool {
        match &self.member_anchors {
            Some(anchors) => anchors
                .get(position)
                .is_none_or(|anchor| first == Some(anchor.as_str())),
            None => true,
        }
    }

    /// Describes why this definition is not sane, if it is not.
    pub fn check_sanity(&self) -> Result<(), String> {
        if self.force_sane {
            return Ok(());
        }
        if self.pattern.is_empty() {
            return Err("pattern is empty".into());
        }
        if self.pattern.len() != self.name_pattern.len() {
            return Err(format!(
                "pattern has {} slots but name pattern has {}",
                self.pattern.len(),
                self.name_pattern.len()
            ));
        }
        if let Some(names) = &self.name_overrides
            && names.len() != self.pattern.len()
        {
            return Err(format!(
                "{} name overrides for {} slots",
                names.len(),
                self.pattern.len()
            ));
        }
        if self.pattern[0].is_any() {
            return Err("first pattern slot is a wildcard".into());
        }
        if let Some(pos) = self.pattern.iter().position(Constraint::is_empty) {
            return Err(format!("pattern slot {pos} admits nothing"));
        }
        if let Some(pos) = self.name_pattern.iter().position(Constraint::is_empty) {
            return Err(format!("name pattern slot {pos} admits nothing"));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_sane(&self) -> bool {
        self.check_sanity().is_ok()
    }

    /// Fills an omitted name pattern with wildcards.
    pub(crate) fn normalize(&mut self) {
        if self.name_pattern.is_empty() {
            self.name_pattern = vec![Constraint::Any; self.pattern.len()];
        }
    }

    /// Copy bound to exact member names, tagged as restored.
    #[must_use]
    pub fn restored(&self, member_names: Vec<String>, instance_name: Option<String>) -> Self {
        let mut copy = self.clone();
        copy.name_overrides = Some(member_names);
        copy.instance_name = instance_name;
        copy.tags.insert(TAG_RESTORED.to_string());
        copy
    }

    /// Pins each member slot to the member starting with that primitive.
    #[must_use]
    pub fn anchored(mut self, anchors: Vec<String>) -> Self {
        self.member_anchors = Some(anchors);
        self
    }

    /// Copy with every trace of restoration removed.
    #[must_use]
    pub fn cleaned(&self) -> Self {
        let mut copy = self.clone();
        copy.name_overrides = None;
        copy.member_anchors = None;
        copy.instance_name = None;
        copy.tags.remove(TAG_RESTORED);
        copy
    }
}

impl fmt::Debug for ClusterTypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterTypeDefinition")
            .field("default_name", &self.default_name)
            .field("type_tag", &self.type_tag)
            .field("priority", &self.priority)
            .field("pattern", &self.pattern)
            .field("name_pattern", &self.name_pattern)
            .field("name_overrides", &self.name_overrides)
            .field("member_anchors", &self.member_anchors)
            .field("instance_name", &self.instance_name)
            .field("creatable", &self.creatable)
            .field("dynamic", &self.dynamic)
            .field("is_layer", &self.is_layer)
            .field("tags", &self.tags)
            .field("index", &self.index)
            .field("check", &self.check.is_some())
            .finish()
    }
}

impl fmt::Display for ClusterTypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots: Vec<String> = self.pattern.iter().map(ToString::to_string).collect();
        write!(
            f,
            "{} ({}) [{}] p{}",
            self.default_name,
            self.type_tag,
            slots.join(", "),
            self.priority
        )
    }
}
