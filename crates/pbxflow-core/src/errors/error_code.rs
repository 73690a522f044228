//! Stable machine-readable error codes.
//!
//! Codes are part of the external contract: callers (the CLI wrapper,
//! remote report aggregators) match on them, so existing codes are never
//! renamed or reused.

/// Maps every error to a stable `&'static str` code.
pub trait FlowErrorCode {
    fn error_code(&self) -> &'static str;
}

// Config
pub const CONFIG_FILE_NOT_FOUND: &str = "PBX-CFG-001";
pub const CONFIG_PARSE: &str = "PBX-CFG-002";
pub const CONFIG_VALIDATION: &str = "PBX-CFG-003";

// Store
pub const STORE_CLIENT_SPAWN: &str = "PBX-STO-001";
pub const STORE_QUERY_FAILED: &str = "PBX-STO-002";
pub const STORE_QUERY_TIMEOUT: &str = "PBX-STO-003";
pub const STORE_CONNECTION_FAILED: &str = "PBX-STO-004";

// Snapshot
pub const SNAPSHOT_READ: &str = "PBX-SNP-001";
pub const SNAPSHOT_WRITE: &str = "PBX-SNP-002";
pub const SNAPSHOT_ENCODE: &str = "PBX-SNP-003";
pub const SNAPSHOT_DECODE: &str = "PBX-SNP-004";
pub const SNAPSHOT_VERSION: &str = "PBX-SNP-005";

// Graph
pub const GRAPH_ENTRY_NOT_FOUND: &str = "PBX-GRF-001";
