//! pbxflow-core: foundation for the PBX call-flow mapping engine.
//!
//! Provides the pieces shared by extraction and graph building:
//! - Snapshot: the canonical, version-independent routing configuration model
//! - Destination decoder: the compact routing-destination encoding
//! - Config: layered TOML/env/CLI configuration
//! - Errors: one enum per subsystem, stable error codes
//! - Collections: hash map/set aliases used across the engine

pub mod config;
pub mod dest;
pub mod errors;
pub mod snapshot;
pub mod trace;
pub mod types;

// Re-exports for convenience
pub use config::{CliOverrides, FlowConfig};
pub use dest::{decode, DestinationRef, TargetKind};
pub use errors::{
    ConfigError, FlowErrorCode, GraphError, PipelineError, SnapshotError, StoreError,
};
pub use snapshot::{Meta, Snapshot, FORMAT_VERSION};
