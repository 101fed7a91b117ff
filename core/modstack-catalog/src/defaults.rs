//! Stock cluster types shipped with modstack.

use crate::ClusterTypeDefinition;
use modstack_types::Constraint;

/// The definitions [`Catalog::with_defaults`](crate::Catalog::with_defaults) registers.
pub fn default_definitions() -> Vec<ClusterTypeDefinition> {
    vec![
        ClusterTypeDefinition::sequence("Double Bevel", "DOUBLE_BEVEL", &["BEVEL", "BEVEL"])
            .with_priority(20),
        ClusterTypeDefinition::sequence(
            "Triple Bevel",
            "TRIPLE_BEVEL",
            &["BEVEL", "BEVEL", "BEVEL"],
        )
        .with_priority(30),
        ClusterTypeDefinition::sequence(
            "Beveled Normals",
            "BEVEL_NORMALS",
            &["BEVEL", "WEIGHTED_NORMAL"],
        )
        .with_priority(10),
        ClusterTypeDefinition::sequence(
            "Mirrored Subdivision",
            "MIRROR_SUBSURF",
            &["MIRROR", "SUBSURF"],
        )
        .with_priority(10),
        ClusterTypeDefinition::sequence("Cut and Bevel", "BOOLEAN_BEVEL", &["BOOLEAN", "BEVEL"])
            .with_priority(5),
        ClusterTypeDefinition::new(
            "Bevel Stack",
            "BEVEL_STACK",
            vec![
                Constraint::one_of(["DOUBLE_BEVEL", "TRIPLE_BEVEL"]),
                Constraint::exactly("BEVEL_NORMALS"),
            ],
        )
        .layer()
        .not_creatable(),
    ]
}
