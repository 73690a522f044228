//! Configuration system for pbxflow.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod extract_config;
pub mod flow_config;
pub mod graph_config;
pub mod store_config;

pub use extract_config::ExtractConfig;
pub use flow_config::{CliOverrides, FlowConfig};
pub use graph_config::GraphConfig;
pub use store_config::StoreConfig;
