//! Matching one definition against a growing item sequence.

use crate::Item;
use modstack_catalog::ClusterTypeDefinition;
use modstack_types::{Availability, MemberView};

/// Decides whether `items` can (still) become an instance of `definition`.
///
/// Positions are checked left to right: type slot first, then the name slot
/// (explicit overrides win over the name pattern), then the member anchor. Leaf definitions accept
/// only primitives and layers only clusters. A sequence shorter than the
/// pattern that passes every check so far needs more input; a full-length one
/// matches, unless the definition's extra check says otherwise.
#[must_use]
pub fn check_availability(definition: &ClusterTypeDefinition, items: &[Item]) -> Availability {
    if items.len() > definition.len() {
        return Availability::Reject;
    }

    for (position, item) in items.iter().enumerate() {
        if item.is_cluster() != definition.is_layer {
            return Availability::Reject;
        }
        if !definition.pattern[position].admits(item.type_tag()) {
            return Availability::Reject;
        }
        if !definition.admits_name(position, item.name()) {
            return Availability::Reject;
        }
        let first = item.first_primitive().map(|p| p.name.as_str());
        if !definition.admits_anchor(position, first) {
            return Availability::Reject;
        }
    }

    if items.len() < definition.len() {
        return Availability::NeedMore;
    }

    if let Some(check) = &definition.check {
        let views: Vec<MemberView<'_>> = items.iter().map(Item::view).collect();
        if let Some(decision) = check.check(&views) {
            return decision;
        }
    }
    Availability::Match
}
