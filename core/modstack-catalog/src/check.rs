use modstack_types::{Availability, MemberView};

/// Optional hook for cluster types whose shape a pattern cannot express.
///
/// Most cluster types do NOT need this; the type and name patterns cover
/// ordinary shapes. The hook runs only once every pattern position has
/// passed. Returning `Some(decision)` overrides the match; `None` keeps it.
pub trait ExtraCheck: Send + Sync {
    fn check(&self, members: &[MemberView<'_>]) -> Option<Availability>;
}

impl<F> ExtraCheck for F
where
    F: Fn(&[MemberView<'_>]) -> Option<Availability> + Send + Sync,
{
    fn check(&self, members: &[MemberView<'_>]) -> Option<Availability> {
        self(members)
    }
}

/// Rejects a match unless every member carries the same type tag.
///
/// Useful together with a wildcard-heavy pattern, e.g. "any two identical
/// modifiers in a row".
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedTypeCheck;

impl ExtraCheck for SharedTypeCheck {
    fn check(&self, members: &[MemberView<'_>]) -> Option<Availability> {
        let first = members.first()?;
        if members.iter().all(|m| m.type_tag == first.type_tag) {
            None
        } else {
            Some(Availability::Reject)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(name: &'a str, type_tag: &'a str) -> MemberView<'a> {
        MemberView {
            name,
            type_tag,
            is_cluster: false,
        }
    }

    #[test]
    fn shared_type_accepts_uniform_members() {
        let members = [view("a", "BEVEL"), view("b", "BEVEL")];
        assert_eq!(SharedTypeCheck.check(&members), None);
    }

    #[test]
    fn shared_type_rejects_mixed_members() {
        let members = [view("a", "BEVEL"), view("b", "MIRROR")];
        assert_eq!(SharedTypeCheck.check(&members), Some(Availability::Reject));
    }

    #[test]
    fn closures_are_checks() {
        let check = |members: &[MemberView<'_>]| {
            (members.len() > 1).then_some(Availability::NeedMore)
        };
        assert_eq!(check.check(&[view("a", "X")]), None);
        assert_eq!(
            check.check(&[view("a", "X"), view("b", "X")]),
            Some(Availability::NeedMore)
        );
    }
}
