//! pbxflow-graph: call-flow graph construction.
//!
//! Starting from a dialed number, repeatedly resolves destination strings
//! against a snapshot into a directed graph of typed nodes and labeled
//! edges. Two guards keep traversal bounded on production data: node-key
//! deduplication (handles cycles and convergence) and a hard depth cap
//! (handles long acyclic daisy-chains).

pub mod builder;
pub mod export;
pub mod index;
pub mod ops;
pub mod types;

pub use builder::build;
pub use export::{ExportEdge, ExportNode, GraphExport};
pub use index::SnapshotIndex;
pub use ops::build_from_snapshot_path;
pub use types::{BranchLabel, CallFlowGraph, FlowNode, NodeKey, NodeKind};
