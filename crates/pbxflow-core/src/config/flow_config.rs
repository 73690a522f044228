//! Top-level pbxflow configuration with 4-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ExtractConfig, GraphConfig, StoreConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`PBXFLOW_*`)
/// 3. Project config (`pbxflow.toml` in the working root)
/// 4. User config (`~/.pbxflow/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FlowConfig {
    pub store: StoreConfig,
    pub extract: ExtractConfig,
    pub graph: GraphConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub store_client: Option<String>,
    pub store_database: Option<String>,
    pub graph_max_depth: Option<u32>,
}

impl FlowConfig {
    /// Load configuration with 4-layer resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(_) => {
                        // Non-parse errors from user config are not fatal.
                        // Continue with defaults.
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("pbxflow.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        tracing::debug!(
            database = config.store.effective_database(),
            parallel = config.extract.effective_parallel(),
            max_depth = config.graph.effective_max_depth(),
            "configuration resolved"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &FlowConfig) -> Result<(), ConfigError> {
        if let Some(ref client) = config.store.client {
            if client.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "store.client".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if let Some(timeout) = config.store.query_timeout_seconds {
            if timeout == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "store.query_timeout_seconds".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(depth) = config.graph.max_depth {
            if depth == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "graph.max_depth".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut FlowConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: FlowConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base`
    /// values only when `other` has a `Some` value.
    fn merge(base: &mut FlowConfig, other: &FlowConfig) {
        // Store
        if other.store.client.is_some() {
            base.store.client = other.store.client.clone();
        }
        if other.store.database.is_some() {
            base.store.database = other.store.database.clone();
        }
        if other.store.query_timeout_seconds.is_some() {
            base.store.query_timeout_seconds = other.store.query_timeout_seconds;
        }

        // Extract
        if other.extract.parallel.is_some() {
            base.extract.parallel = other.extract.parallel;
        }

        // Graph
        if other.graph.max_depth.is_some() {
            base.graph.max_depth = other.graph.max_depth;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `PBXFLOW_STORE_DATABASE`, `PBXFLOW_GRAPH_MAX_DEPTH`, etc.
    fn apply_env_overrides(config: &mut FlowConfig) {
        if let Ok(val) = std::env::var("PBXFLOW_STORE_CLIENT") {
            config.store.client = Some(val);
        }
        if let Ok(val) = std::env::var("PBXFLOW_STORE_DATABASE") {
            config.store.database = Some(val);
        }
        if let Ok(val) = std::env::var("PBXFLOW_STORE_QUERY_TIMEOUT_SECONDS") {
            if let Ok(v) = val.parse::<u64>() {
                config.store.query_timeout_seconds = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PBXFLOW_EXTRACT_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.extract.parallel = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PBXFLOW_GRAPH_MAX_DEPTH") {
            if let Ok(v) = val.parse::<u32>() {
                config.graph.max_depth = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut FlowConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.store_client {
            config.store.client = Some(v.clone());
        }
        if let Some(ref v) = cli.store_database {
            config.store.database = Some(v.clone());
        }
        if let Some(v) = cli.graph_max_depth {
            config.graph.max_depth = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user config path: `~/.pbxflow/config.toml`.
fn user_config_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".pbxflow").join("config.toml"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
