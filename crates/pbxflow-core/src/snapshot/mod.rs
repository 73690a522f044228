//! The canonical, version-independent routing configuration snapshot.
//!
//! A snapshot is produced once per extraction run and is immutable after
//! serialization. Downstream graph building only ever reads it.

pub mod serializer;
pub mod types;

pub use serializer::{
    from_json_bytes, load_from_path, save_to_path, to_json_bytes, FORMAT_VERSION,
};
pub use types::{
    Announcement, Extension, InboundRoute, IvrMenu, IvrOption, Meta, OutboundRoute, Queue,
    Recording, RingGroup, Snapshot, TimeCondition, TimeGroup, Trunk,
};
