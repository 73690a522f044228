//! Configuration-store access errors.
//!
//! Only connection-level failures abort an extraction run. A per-query
//! timeout or failure is converted by the extractor into a warning plus an
//! empty result for that entity kind.

use super::error_code::{self, FlowErrorCode};

/// Errors raised by the external SQL client.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The client binary could not be launched at all.
    #[error("Failed to launch `{client}`: {message}")]
    ClientSpawn { client: String, message: String },

    /// The client ran but the query failed (non-zero exit).
    #[error("Query against `{database}` failed: {message}")]
    QueryFailed { database: String, message: String },

    /// The query did not complete within the configured timeout.
    #[error("Query against `{database}` timed out after {seconds}s")]
    QueryTimeout { database: String, seconds: u64 },

    /// The store is unreachable. Fatal for the whole extraction run.
    #[error("Cannot reach configuration store: {message}")]
    ConnectionFailed { message: String },
}

impl FlowErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ClientSpawn { .. } => error_code::STORE_CLIENT_SPAWN,
            Self::QueryFailed { .. } => error_code::STORE_QUERY_FAILED,
            Self::QueryTimeout { .. } => error_code::STORE_QUERY_TIMEOUT,
            Self::ConnectionFailed { .. } => error_code::STORE_CONNECTION_FAILED,
        }
    }
}
