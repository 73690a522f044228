//! Snapshot persistence: versioned JSON, round-trip stable.

use std::path::Path;

use crate::errors::SnapshotError;

use super::types::Snapshot;

/// Current snapshot document format version.
///
/// Bumped only when a change cannot be expressed as a new optional field.
/// Documents with a newer version than this build understands are rejected;
/// older documents load with defaults for fields they predate.
pub const FORMAT_VERSION: u32 = 1;

/// Serialize a snapshot to pretty-printed JSON bytes.
pub fn to_json_bytes(snapshot: &Snapshot) -> Result<Vec<u8>, SnapshotError> {
    serde_json::to_vec_pretty(snapshot).map_err(|e| SnapshotError::EncodeFailed {
        message: e.to_string(),
    })
}

/// Deserialize a snapshot from JSON bytes, checking the format version.
pub fn from_json_bytes(bytes: &[u8]) -> Result<Snapshot, SnapshotError> {
    let snapshot: Snapshot =
        serde_json::from_slice(bytes).map_err(|e| SnapshotError::DecodeFailed {
            message: e.to_string(),
        })?;

    if snapshot.format_version > FORMAT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: snapshot.format_version,
            supported: FORMAT_VERSION,
        });
    }

    Ok(snapshot)
}

/// Write a snapshot document to disk.
pub fn save_to_path(snapshot: &Snapshot, path: &Path) -> Result<(), SnapshotError> {
    let bytes = to_json_bytes(snapshot)?;
    std::fs::write(path, bytes).map_err(|e| SnapshotError::WriteFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load a snapshot document from disk.
pub fn load_from_path(path: &Path) -> Result<Snapshot, SnapshotError> {
    let bytes = std::fs::read(path).map_err(|e| SnapshotError::ReadFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    from_json_bytes(&bytes)
}
