//! Extraction configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the extraction subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExtractConfig {
    /// Run independent sub-extractors on worker threads. Default: true.
    /// Sequential execution is equally valid; parallelism only shortens
    /// wall-clock time on stores with slow round-trips.
    pub parallel: Option<bool>,
}

impl ExtractConfig {
    /// Returns whether sub-extractors run in parallel, defaulting to true.
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}
