use modstack_parser::ParserConfig;
use serde::{Deserialize, Serialize};

/// Configuration for a [`ClusterTree`](crate::ClusterTree).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub parser: ParserConfig,
    /// Host property holding the persisted layout.
    pub state_key: String,
    /// Host property holding the stack snapshot.
    pub snapshot_key: String,
    /// Whether catalog files may replace already registered definitions.
    pub replace_definitions: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            state_key: "modstack.state".to_string(),
            snapshot_key: "modstack.snapshot".to_string(),
            replace_definitions: false,
        }
    }
}
