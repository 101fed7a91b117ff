//! The host-side modifier stack.

use crate::{HostError, HostResult};
use modstack_types::{Direction, Primitive};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// One object's primitive stack and property storage, as provided by the host.
///
/// Calls are synchronous and take effect immediately; the tree re-reads
/// [`ModifierHost::primitive_list`] after mutating to confirm the result.
pub trait ModifierHost {
    /// The live stack, top to bottom.
    fn primitive_list(&self) -> Vec<Primitive>;

    /// Appends a primitive at the bottom. The host may adjust `name` to keep
    /// names unique; the created primitive is returned.
    fn primitive_create(&mut self, name: &str, type_tag: &str) -> HostResult<Primitive>;

    fn primitive_remove(&mut self, name: &str) -> HostResult<()>;

    /// Bakes a primitive into the object, which takes it off the stack.
    fn primitive_apply(&mut self, name: &str) -> HostResult<()>;

    /// Moves a primitive one position.
    fn primitive_move(&mut self, name: &str, direction: Direction) -> HostResult<()>;

    fn persisted_property_get(&self, key: &str) -> Option<String>;

    fn persisted_property_set(&mut self, key: &str, value: String) -> HostResult<()>;
}

/// A [`ModifierHost`] kept entirely in memory.
///
/// Names are made unique the way Blender does it (`bevel`, `bevel.001`, ...).
/// Primitives listed with [`InMemoryHost::refuse`] make every call on them
/// fail, which lets callers exercise their failure paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    stack: Vec<Primitive>,
    properties: BTreeMap<String, String>,
    applied: Vec<Primitive>,
    refused: BTreeSet<String>,
}

impl InMemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_stack(stack: Vec<Primitive>) -> Self {
        Self {
            stack,
            ..Self::default()
        }
    }

    /// Primitives applied so far, in the order they were applied.
    #[must_use]
    pub fn applied(&self) -> &[Primitive] {
        &self.applied
    }

    /// Makes every later call on `name` fail.
    pub fn refuse(&mut self, name: impl Into<String>) {
        self.refused.insert(name.into());
    }

    /// Edits the stack directly, bypassing the tree.
    pub fn stack_mut(&mut self) -> &mut Vec<Primitive> {
        &mut self.stack
    }

    fn position(&self, name: &str) -> HostResult<usize> {
        if self.refused.contains(name) {
            return Err(HostError::Refused(name.to_string()));
        }
        self.stack
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| HostError::NotFound(name.to_string()))
    }

    fn unique_name(&self, base: &str) -> String {
        let taken = |candidate: &str| self.stack.iter().any(|p| p.name == candidate);
        if !taken(base) {
            return base.to_string();
        }
        let mut n = 1;
        loop {
            let candidate = format!("{base}.{n:03}");
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl ModifierHost for InMemoryHost {
    fn primitive_list(&self) -> Vec<Primitive> {
        self.stack.clone()
    }

    fn primitive_create(&mut self, name: &str, type_tag: &str) -> HostResult<Primitive> {
        if self.refused.contains(name) {
            return Err(HostError::Refused(name.to_string()));
        }
        let primitive = Primitive::new(self.unique_name(name), type_tag);
        debug!(primitive = %primitive, "created primitive");
        self.stack.push(primitive.clone());
        Ok(primitive)
    }

    fn primitive_remove(&mut self, name: &str) -> HostResult<()> {
        let pos = self.position(name)?;
        self.stack.remove(pos);
        Ok(())
    }

    fn primitive_apply(&mut self, name: &str) -> HostResult<()> {
        let pos = self.position(name)?;
        let primitive = self.stack.remove(pos);
        self.applied.push(primitive);
        Ok(())
    }

    fn primitive_move(&mut self, name: &str, direction: Direction) -> HostResult<()> {
        let pos = self.position(name)?;
        let target = match direction {
            Direction::Up => pos.checked_sub(1),
            Direction::Down => Some(pos + 1).filter(|&p| p < self.stack.len()),
        };
        let target = target.ok_or_else(|| HostError::AtBoundary {
            name: name.to_string(),
            direction,
        })?;
        self.stack.swap(pos, target);
        Ok(())
    }

    fn persisted_property_get(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn persisted_property_set(&mut self, key: &str, value: String) -> HostResult<()> {
        self.properties.insert(key.to_string(), value);
        Ok(())
    }
}
