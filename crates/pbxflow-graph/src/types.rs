//! Call-flow graph types.

use std::collections::BTreeMap;
use std::fmt;

use pbxflow_core::dest::TargetKind;
use pbxflow_core::types::collections::FxHashMap;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use serde::Serialize;

/// What a graph node represents.
///
/// Extends [`TargetKind`] with the inbound-route entry node, which is a
/// graph concept rather than a destination target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    InboundRoute,
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

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InboundRoute => "inbound-route",
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

    /// Human title used when an entity has no configured label.
    pub(crate) fn title(&self) -> &'static str {
        match self {
            Self::InboundRoute => "Inbound Route",
            Self::RingGroup => "Ring Group",
            Self::Queue => "Queue",
            Self::Ivr => "IVR",
            Self::TimeCondition => "Time Condition",
            Self::Announcement => "Announcement",
            Self::Extension => "Extension",
            Self::OutboundRoute => "Outbound Route",
            Self::Trunk => "Trunk",
            Self::Voicemail => "Voicemail",
            Self::Hangup => "Hang Up",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<TargetKind> for NodeKind {
    fn from(kind: TargetKind) -> Self {
        match kind {
            TargetKind::RingGroup => Self::RingGroup,
            TargetKind::Queue => Self::Queue,
            TargetKind::Ivr => Self::Ivr,
            TargetKind::TimeCondition => Self::TimeCondition,
            TargetKind::Announcement => Self::Announcement,
            TargetKind::Extension => Self::Extension,
            TargetKind::OutboundRoute => Self::OutboundRoute,
            TargetKind::Trunk => Self::Trunk,
            TargetKind::Voicemail => Self::Voicemail,
            TargetKind::Hangup => Self::Hangup,
            TargetKind::Unknown => Self::Unknown,
        }
    }
}

/// Node identity within one graph. Nodes are deduplicated by key, which is
/// what turns revisits (cycles, converging branches) into plain edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeKey {
    pub kind: NodeKind,
    pub id: String,
}

impl NodeKey {
    pub fn new(kind: NodeKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// The semantic condition an edge represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum BranchLabel {
    /// Unconditional (the entry route's edge).
    Always,
    True,
    False,
    /// A caller selection in an IVR menu.
    Digit(String),
    Timeout,
    Invalid,
    NoAnswer,
    AfterPlayback,
}

impl BranchLabel {
    pub fn as_text(&self) -> String {
        match self {
            Self::Always => "always".to_string(),
            Self::True => "true".to_string(),
            Self::False => "false".to_string(),
            Self::Digit(d) => format!("digit {d}"),
            Self::Timeout => "timeout".to_string(),
            Self::Invalid => "invalid".to_string(),
            Self::NoAnswer => "no-answer".to_string(),
            Self::AfterPlayback => "after-playback".to_string(),
        }
    }
}

impl From<BranchLabel> for String {
    fn from(label: BranchLabel) -> Self {
        label.as_text()
    }
}

impl fmt::Display for BranchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// A typed node with renderer-facing label and metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    pub key: NodeKey,
    pub label: String,
    /// Kind-specific details (strategy, ring time, raw text for unresolved
    /// leaves). Ordered map so enumeration is deterministic.
    pub metadata: BTreeMap<String, String>,
}

/// Build-level facts about one graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphMeta {
    /// The DID the traversal was seeded from.
    pub entry_did: String,
    /// Set when the depth cap discarded pending work. The graph is still
    /// usable, just incomplete.
    pub truncated: bool,
}

/// A directed call-flow graph for one entry point.
///
/// Created fresh per build, held in memory, consumed through the export
/// interface. Never persisted.
#[derive(Debug, Default)]
pub struct CallFlowGraph {
    pub(crate) graph: StableDiGraph<FlowNode, BranchLabel>,
    pub(crate) keys: FxHashMap<NodeKey, NodeIndex>,
    pub(crate) meta: GraphMeta,
}

impl CallFlowGraph {
    pub(crate) fn new(entry_did: &str) -> Self {
        Self {
            meta: GraphMeta {
                entry_did: entry_did.to_string(),
                truncated: false,
            },
            ..Default::default()
        }
    }

    /// Insert a node, indexing it by key.
    pub(crate) fn insert(&mut self, node: FlowNode) -> NodeIndex {
        let key = node.key.clone();
        let idx = self.graph.add_node(node);
        self.keys.insert(key, idx);
        idx
    }

    pub fn entry_did(&self) -> &str {
        &self.meta.entry_did
    }

    pub fn is_truncated(&self) -> bool {
        self.meta.truncated
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.keys.contains_key(key)
    }

    /// Look up a node by key.
    pub fn node(&self, key: &NodeKey) -> Option<&FlowNode> {
        self.keys.get(key).map(|idx| &self.graph[*idx])
    }
}
