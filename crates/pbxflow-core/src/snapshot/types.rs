//! Snapshot entity types.
//!
//! Field names are part of the persisted document contract: new optional
//! fields may be added, existing names and types are never repurposed.
//! Identifiers are kept as strings; routing references join on them
//! textually, and some historical schema revisions store them as text.

use serde::{Deserialize, Serialize};

/// An inbound route: maps a dialed number (DID) to its first destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundRoute {
    /// Dialed number. Empty for the catch-all ("any DID") route.
    pub did: String,
    /// Optional caller-id filter. Empty when the route matches any caller.
    #[serde(default)]
    pub caller_id_filter: String,
    /// Raw destination string (decoded on demand).
    pub destination: String,
    #[serde(default)]
    pub label: String,
}

/// A ring group: a set of extensions rung together or in sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingGroup {
    pub group_id: String,
    #[serde(default)]
    pub label: String,
    /// Member extensions, in configured order.
    #[serde(default)]
    pub members: Vec<String>,
    /// Ring strategy (e.g. `ringall`, `hunt`).
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub ring_seconds: u32,
    /// No-answer fallback destination. Empty when the revision has none.
    #[serde(default)]
    pub destination: String,
}

/// A call queue with static and dynamic agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Queue {
    pub queue_id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub timeout_seconds: u32,
    #[serde(default)]
    pub static_members: Vec<String>,
    #[serde(default)]
    pub dynamic_members: Vec<String>,
    /// Timeout fallback destination. Empty when the revision has none.
    #[serde(default)]
    pub destination: String,
}

/// An interactive voice menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IvrMenu {
    pub ivr_id: String,
    #[serde(default)]
    pub label: String,
    /// Recording played as the menu greeting.
    #[serde(default)]
    pub announcement_id: String,
}

/// A single caller selection within an IVR menu.
///
/// `selection` is one of the digits `0`-`9`, `*`, `#`, `t` (timeout),
/// or `i` (invalid input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IvrOption {
    pub ivr_id: String,
    pub selection: String,
    pub destination: String,
}

/// A schedule-gated branch point into two destinations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeCondition {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub time_group_id: String,
    pub destination_true: String,
    pub destination_false: String,
}

/// A named set of schedule rules. Rules are opaque to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeGroup {
    pub id: String,
    #[serde(default)]
    pub rules: Vec<String>,
}

/// A playback step with a follow-on destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub post_destination: String,
}

/// A local extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub number: String,
    #[serde(default)]
    pub label: String,
}

/// A system recording referenced by announcements and IVR greetings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub filename: String,
}

/// An outbound carrier channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trunk {
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// Channel technology (e.g. `sip`, `pjsip`, `dahdi`).
    #[serde(default)]
    pub technology: String,
    #[serde(default)]
    pub channel_id: String,
    /// 0 means unlimited.
    #[serde(default)]
    pub max_channels: u32,
    #[serde(default)]
    pub disabled: bool,
}

/// Pattern-matching rules selecting a trunk sequence for dialed numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundRoute {
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// Dial patterns, in configured order.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Trunk ids tried in order.
    #[serde(default)]
    pub trunk_sequence: Vec<String>,
}

/// Run provenance embedded in every snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub hostname: String,
    /// Version string reported by the relational store.
    #[serde(default)]
    pub store_version: String,
    /// PBX software version, when the installation records one.
    #[serde(default)]
    pub pbx_version: String,
    /// Unix epoch seconds, UTC.
    #[serde(default)]
    pub generated_at_utc: u64,
}

/// The complete normalized snapshot document.
///
/// All collections default to empty so documents written by older builds
/// (or with collections degraded away by schema drift) load cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub format_version: u32,
    pub meta: Meta,
    pub inbound_routes: Vec<InboundRoute>,
    pub ring_groups: Vec<RingGroup>,
    pub queues: Vec<Queue>,
    pub ivr_menus: Vec<IvrMenu>,
    pub ivr_options: Vec<IvrOption>,
    pub time_conditions: Vec<TimeCondition>,
    pub time_groups: Vec<TimeGroup>,
    pub announcements: Vec<Announcement>,
    pub extensions: Vec<Extension>,
    pub recordings: Vec<Recording>,
    pub trunks: Vec<Trunk>,
    pub outbound_routes: Vec<OutboundRoute>,
}

impl Snapshot {
    /// Create an empty snapshot at the current format version.
    pub fn new(meta: Meta) -> Self {
        Self {
            format_version: super::serializer::FORMAT_VERSION,
            meta,
            ..Default::default()
        }
    }

    /// Total entity count across all collections.
    pub fn entity_count(&self) -> usize {
        self.inbound_routes.len()
            + self.ring_groups.len()
            + self.queues.len()
            + self.ivr_menus.len()
            + self.ivr_options.len()
            + self.time_conditions.len()
            + self.time_groups.len()
            + self.announcements.len()
            + self.extensions.len()
            + self.recordings.len()
            + self.trunks.len()
            + self.outbound_routes.len()
    }
}
