//! Top-level pipeline errors.

use super::error_code::FlowErrorCode;
use super::{ConfigError, GraphError, SnapshotError, StoreError};

/// Errors that can surface from the two pipeline operations
/// (extract-to-path, build-from-snapshot-path).
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

impl FlowErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::Snapshot(e) => e.error_code(),
            Self::Graph(e) => e.error_code(),
        }
    }
}
