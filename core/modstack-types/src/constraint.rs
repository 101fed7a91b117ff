//! Pattern slot constraints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One position of a type or name pattern.
///
/// Serialized as `"any"` or `{"one_of": ["BEVEL", ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// Wildcard, admits every value.
    Any,
    /// Admits only the listed values.
    OneOf(BTreeSet<String>),
}

impl Constraint {
    /// Shorthand for a set constraint.
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// Shorthand for a single allowed value.
    pub fn exactly(value: impl Into<String>) -> Self {
        Self::OneOf(BTreeSet::from([value.into()]))
    }

    /// Returns true if `value` satisfies this slot.
    #[must_use]
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Self::Any => true,
            Self::OneOf(set) => set.contains(value),
        }
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Returns true for a set constraint that admits nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::OneOf(set) if set.is_empty())
    }

    /// The single admitted value, if this slot names exactly one.
    #[must_use]
    pub fn single(&self) -> Option<&str> {
        match self {
            Self::OneOf(set) if set.len() == 1 => set.iter().next().map(String::as_str),
            _ => None,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::OneOf(set) => {
                let joined: Vec<&str> = set.iter().map(String::as_str).collect();
                write!(f, "{}", joined.join("|"))
            }
        }
    }
}
