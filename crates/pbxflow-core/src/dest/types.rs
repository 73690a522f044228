//! Decoded destination types.

use serde::{Deserialize, Serialize};

/// The kind of routing target a destination string points at.
///
/// Closed set: tokens outside the known table decode to `Unknown` so the
/// graph builder can render an unresolved leaf instead of aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    RingGroup,
    Queue,
    Ivr,
    TimeCondition,
    Announcement,
    Extension,
    OutboundRoute,
    Trunk,
    Voicemail,
    Hangup,
    Unknown,
}

impl TargetKind {
    /// Stable kebab-case name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RingGroup => "ring-group",
            Self::Queue => "queue",
            Self::Ivr => "ivr",
            Self::TimeCondition => "time-condition",
            Self::Announcement => "announcement",
            Self::Extension => "extension",
            Self::OutboundRoute => "outbound-route",
            Self::Trunk => "trunk",
            Self::Voicemail => "voicemail",
            Self::Hangup => "hangup",
            Self::Unknown => "unknown",
        }
    }
}

/// A decoded destination reference. Ephemeral, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationRef {
    pub kind: TargetKind,
    /// Identifier of the target within its collection. Empty for `Unknown`.
    pub target_id: String,
    /// Optional sub-selector (entry point label, priority, voicemail mode).
    pub sub_selector: Option<String>,
    /// The original text, preserved for diagnostics.
    pub raw: String,
}

impl DestinationRef {
    /// An unresolved reference carrying the raw text.
    pub fn unknown(raw: &str) -> Self {
        Self {
            kind: TargetKind::Unknown,
            target_id: String::new(),
            sub_selector: None,
            raw: raw.to_string(),
        }
    }
}
