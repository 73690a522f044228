//! Configuration-store access configuration.

use serde::{Deserialize, Serialize};

/// How the external SQL client is invoked.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Client binary. Default: `mysql`.
    pub client: Option<String>,
    /// Target database name. Default: `asterisk`.
    pub database: Option<String>,
    /// Per-query timeout in seconds. Default: 30.
    pub query_timeout_seconds: Option<u64>,
}

impl StoreConfig {
    /// Returns the effective client binary, defaulting to `mysql`.
    pub fn effective_client(&self) -> String {
        self.client.clone().unwrap_or_else(|| "mysql".to_string())
    }

    /// Returns the effective database name, defaulting to `asterisk`.
    pub fn effective_database(&self) -> String {
        self.database
            .clone()
            .unwrap_or_else(|| "asterisk".to_string())
    }

    /// Returns the effective per-query timeout, defaulting to 30 seconds.
    pub fn effective_query_timeout_seconds(&self) -> u64 {
        self.query_timeout_seconds.unwrap_or(30)
    }
}
