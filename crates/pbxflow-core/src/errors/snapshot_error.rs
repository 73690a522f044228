//! Snapshot document errors.

use super::error_code::{self, FlowErrorCode};

/// Errors raised while persisting or loading the snapshot document.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot at {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to write snapshot at {path}: {message}")]
    WriteFailed { path: String, message: String },

    #[error("Failed to encode snapshot document: {message}")]
    EncodeFailed { message: String },

    #[error("Failed to decode snapshot document: {message}")]
    DecodeFailed { message: String },

    /// The document was produced by a newer tool version.
    #[error("Unsupported snapshot format version {found} (this build supports up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

impl FlowErrorCode for SnapshotError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ReadFailed { .. } => error_code::SNAPSHOT_READ,
            Self::WriteFailed { .. } => error_code::SNAPSHOT_WRITE,
            Self::EncodeFailed { .. } => error_code::SNAPSHOT_ENCODE,
            Self::DecodeFailed { .. } => error_code::SNAPSHOT_DECODE,
            Self::UnsupportedVersion { .. } => error_code::SNAPSHOT_VERSION,
        }
    }
}
