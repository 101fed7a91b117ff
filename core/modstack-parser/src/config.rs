use serde::{Deserialize, Serialize};

/// Tuning knobs for [`ClusterParser`](crate::ClusterParser).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Upper bound on layering passes.
    pub max_layer_iterations: usize,
    /// Check after every pass that no primitive was created or lost.
    pub verify_primitives: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_layer_iterations: 10,
            verify_primitives: true,
        }
    }
}
