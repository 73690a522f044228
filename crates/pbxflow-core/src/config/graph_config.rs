//! Graph-build configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the call-flow graph builder.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GraphConfig {
    /// Traversal depth cap. Default: 100.
    /// A safety valve for pathological daisy-chains; exceeding it truncates
    /// the graph instead of failing.
    pub max_depth: Option<u32>,
}

impl GraphConfig {
    /// Returns the effective depth cap, defaulting to 100.
    pub fn effective_max_depth(&self) -> u32 {
        self.max_depth.unwrap_or(100)
    }
}
