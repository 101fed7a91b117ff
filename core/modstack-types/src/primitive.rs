//! Primitive stack entries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One atomic entry of the host's modifier stack.
///
/// Owned by the host; the core only ever reads `name` and `type_tag`.
/// Names are unique within one object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Primitive {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
}

impl Primitive {
    /// Creates a primitive descriptor.
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
        }
    }

    /// Parses a `TYPE:name` shorthand, as used by the CLI and tests.
    pub fn parse(s: &str) -> crate::Result<Self> {
        match s.split_once(':') {
            Some((type_tag, name)) if !type_tag.is_empty() && !name.is_empty() => {
                Ok(Self::new(name, type_tag))
            }
            _ => Err(crate::Error::InvalidPrimitive(s.to_string())),
        }
    }

    /// Parses a JSON array of `{"name": .., "type": ..}` objects.
    pub fn list_from_json(json: &str) -> crate::Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_tag, self.name)
    }
}

/// Direction for a single-step stack move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}
