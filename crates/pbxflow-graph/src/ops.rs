//! Snapshot-file entry point for graph building.

use std::path::Path;

use pbxflow_core::errors::PipelineError;
use pbxflow_core::snapshot;

use crate::builder::build;
use crate::types::CallFlowGraph;

/// Load a snapshot document and build the graph for one DID.
///
/// This is the second of the two operations the engine exposes to callers
/// (the first being extract-to-path); exit-code policy stays with the
/// caller.
pub fn build_from_snapshot_path(
    path: &Path,
    did: &str,
    max_depth: u32,
) -> Result<CallFlowGraph, PipelineError> {
    let snapshot = snapshot::load_from_path(path)?;
    tracing::debug!(
        path = %path.display(),
        entities = snapshot.entity_count(),
        generated_at_utc = snapshot.meta.generated_at_utc,
        "snapshot loaded"
    );
    Ok(build(&snapshot, did, max_depth)?)
}
