//! Choosing one winner among confirmed candidates.

use modstack_catalog::ClusterTypeDefinition;
use std::sync::Arc;

/// Picks the definition to instantiate from the candidates that matched the
/// current window.
///
/// Restored candidates always win; among them the longest pattern is taken.
/// Otherwise the longest pattern wins and priority decides between equal
/// lengths. Full ties go to the earliest candidate.
#[must_use]
pub fn select_winner(
    confirmed: &[Arc<ClusterTypeDefinition>],
) -> Option<&Arc<ClusterTypeDefinition>> {
    let restored = best_by(confirmed.iter().filter(|d| d.is_restored()), |d| (d.len(), 0));
    restored.or_else(|| best_by(confirmed.iter(), |d| (d.len(), d.priority)))
}

fn best_by<'a, I, K>(
    candidates: I,
    key: impl Fn(&ClusterTypeDefinition) -> K,
) -> Option<&'a Arc<ClusterTypeDefinition>>
where
    I: Iterator<Item = &'a Arc<ClusterTypeDefinition>>,
    K: Ord,
{
    candidates.fold(None, |best, candidate| match best {
        Some(current) if key(current.as_ref()) >= key(candidate.as_ref()) => Some(current),
        _ => Some(candidate),
    })
}
