//! Error handling for pbxflow.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod graph_error;
pub mod pipeline_error;
pub mod snapshot_error;
pub mod store_error;

pub use config_error::ConfigError;
pub use error_code::FlowErrorCode;
pub use graph_error::GraphError;
pub use pipeline_error::PipelineError;
pub use snapshot_error::SnapshotError;
pub use store_error::StoreError;
