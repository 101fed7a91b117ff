//! Matcher verdicts.

use serde::{Deserialize, Serialize};

/// Verdict of matching one definition against a growing item sequence.
///
/// - `Reject` ends the definition's current attempt.
/// - `NeedMore` keeps it alive for the next item.
/// - `Match` finalizes it as a candidate instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Match,
    NeedMore,
    Reject,
}

impl Availability {
    #[must_use]
    pub const fn is_match(self) -> bool {
        matches!(self, Self::Match)
    }

    #[must_use]
    pub const fn is_alive(self) -> bool {
        !matches!(self, Self::Reject)
    }
}

/// Read-only view of one item handed to extra-check hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberView<'a> {
    pub name: &'a str,
    pub type_tag: &'a str,
    /// True when the item is an already-formed cluster rather than a primitive.
    pub is_cluster: bool,
}
