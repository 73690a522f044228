//! The call-flow graph builder.
//!
//! Work-queue traversal over decoded destinations. Each popped item either
//! links to an already-built node (cycle/convergence guard: no
//! re-expansion) or materializes a new node and enqueues its outgoing
//! destinations per the kind-specific branching rules. Traversal is
//! strictly sequential; the dedup guard depends on ordering.

use std::collections::{BTreeMap, VecDeque};

use pbxflow_core::dest::{decode, DestinationRef, TargetKind};
use pbxflow_core::errors::GraphError;
use pbxflow_core::snapshot::Snapshot;

use crate::index::SnapshotIndex;
use crate::types::{BranchLabel, CallFlowGraph, FlowNode, NodeKey, NodeKind};

/// One pending edge: parent node, raw destination, and the condition the
/// edge represents.
struct WorkItem {
    parent: petgraph::stable_graph::NodeIndex,
    raw: String,
    branch: BranchLabel,
    depth: u32,
}

/// Build the call-flow graph for one dialed number.
///
/// Returns `EntryPointNotFound` only when no inbound route matches at all;
/// a matching route with an undecodable destination still yields a
/// two-node graph (entry plus `Unknown` leaf), so callers can tell the
/// two cases apart.
///
/// Deterministic: for a fixed snapshot and DID, repeated builds produce
/// the same node and edge set.
pub fn build(
    snapshot: &Snapshot,
    did: &str,
    max_depth: u32,
) -> Result<CallFlowGraph, GraphError> {
    let index = SnapshotIndex::build(snapshot);
    let Some(route) = index.route_for_did(did) else {
        return Err(GraphError::EntryPointNotFound {
            did: did.to_string(),
        });
    };

    let mut graph = CallFlowGraph::new(did);
    let entry_idx = graph.insert(entry_node(route));

    let mut queue: VecDeque<WorkItem> = VecDeque::new();
    queue.push_back(WorkItem {
        parent: entry_idx,
        raw: route.destination.clone(),
        branch: BranchLabel::Always,
        depth: 1,
    });

    while let Some(item) = queue.pop_front() {
        // FIFO order means depths are non-decreasing: once one item is past
        // the cap, everything still queued is too. Discard and flag.
        if item.depth > max_depth {
            tracing::warn!(
                did,
                max_depth,
                pending = queue.len() + 1,
                "depth cap hit; graph truncated"
            );
            graph.meta.truncated = true;
            break;
        }

        let dest = decode(&item.raw);
        let key = node_key(&dest);

        if let Some(&existing) = graph.keys.get(&key) {
            // Revisit: link and stop expanding this branch.
            graph.graph.add_edge(item.parent, existing, item.branch);
            continue;
        }

        let (node, children) = expand(&index, &dest, key);
        let idx = graph.insert(node);
        graph.graph.add_edge(item.parent, idx, item.branch);

        for (raw, branch) in children {
            // An absent fallback terminates the branch with no edge.
            if raw.is_empty() {
                continue;
            }
            queue.push_back(WorkItem {
                parent: idx,
                raw,
                branch,
                depth: item.depth + 1,
            });
        }
    }

    tracing::debug!(
        did,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        truncated = graph.is_truncated(),
        "graph build complete"
    );
    Ok(graph)
}

/// Node identity for a decoded destination. Unresolved leaves keep their
/// raw text as identity so distinct misconfigurations stay distinct.
fn node_key(dest: &DestinationRef) -> NodeKey {
    match dest.kind {
        TargetKind::Unknown => NodeKey::new(NodeKind::Unknown, dest.raw.trim()),
        kind => NodeKey::new(kind.into(), dest.target_id.as_str()),
    }
}

fn entry_node(route: &pbxflow_core::snapshot::InboundRoute) -> FlowNode {
    // The catch-all route has an empty DID; give its node a stable id.
    let id = if route.did.is_empty() {
        "any"
    } else {
        route.did.as_str()
    };
    let mut metadata = BTreeMap::new();
    if !route.caller_id_filter.is_empty() {
        metadata.insert("caller_id_filter".to_string(), route.caller_id_filter.clone());
    }
    FlowNode {
        key: NodeKey::new(NodeKind::InboundRoute, id),
        label: labelled(NodeKind::InboundRoute, id, &route.label),
        metadata,
    }
}

/// Materialize a node and its outgoing `(destination, branch)` pairs.
fn expand(
    index: &SnapshotIndex<'_>,
    dest: &DestinationRef,
    key: NodeKey,
) -> (FlowNode, Vec<(String, BranchLabel)>) {
    let id = dest.target_id.as_str();
    let mut metadata = BTreeMap::new();
    let mut children = Vec::new();
    let mut label = String::new();

    match dest.kind {
        TargetKind::RingGroup => match index.ring_group(id) {
            Some(group) => {
                label = labelled(NodeKind::RingGroup, id, &group.label);
                metadata.insert("strategy".to_string(), group.strategy.clone());
                metadata.insert("ring_seconds".to_string(), group.ring_seconds.to_string());
                metadata.insert("members".to_string(), group.members.join(" "));
                children.push((group.destination.clone(), BranchLabel::NoAnswer));
            }
            None => mark_missing(&mut metadata, &mut label, NodeKind::RingGroup, id),
        },
        TargetKind::Queue => match index.queue(id) {
            Some(queue) => {
                label = labelled(NodeKind::Queue, id, &queue.label);
                metadata.insert("strategy".to_string(), queue.strategy.clone());
                metadata.insert(
                    "timeout_seconds".to_string(),
                    queue.timeout_seconds.to_string(),
                );
                metadata.insert(
                    "agents".to_string(),
                    format!(
                        "{} static, {} dynamic",
                        queue.static_members.len(),
                        queue.dynamic_members.len()
                    ),
                );
                children.push((queue.destination.clone(), BranchLabel::Timeout));
            }
            None => mark_missing(&mut metadata, &mut label, NodeKind::Queue, id),
        },
        TargetKind::Ivr => match index.ivr_menu(id) {
            Some(menu) => {
                label = labelled(NodeKind::Ivr, id, &menu.label);
                if !menu.announcement_id.is_empty() {
                    metadata.insert("announcement".to_string(), menu.announcement_id.clone());
                }
                // A menu with zero resolvable options is a terminal node.
                for option in index.ivr_options(id) {
                    children.push((
                        option.destination.clone(),
                        selection_branch(&option.selection),
                    ));
                }
            }
            None => mark_missing(&mut metadata, &mut label, NodeKind::Ivr, id),
        },
        TargetKind::TimeCondition => match index.time_condition(id) {
            Some(tc) => {
                label = labelled(NodeKind::TimeCondition, id, &tc.label);
                if !tc.time_group_id.is_empty() {
                    metadata.insert("time_group".to_string(), tc.time_group_id.clone());
                }
                children.push((tc.destination_true.clone(), BranchLabel::True));
                children.push((tc.destination_false.clone(), BranchLabel::False));
            }
            None => mark_missing(&mut metadata, &mut label, NodeKind::TimeCondition, id),
        },
        TargetKind::Announcement => match index.announcement(id) {
            Some(announcement) => {
                label = labelled(NodeKind::Announcement, id, &announcement.label);
                children.push((
                    announcement.post_destination.clone(),
                    BranchLabel::AfterPlayback,
                ));
            }
            None => mark_missing(&mut metadata, &mut label, NodeKind::Announcement, id),
        },
        TargetKind::Extension => match index.extension(id) {
            Some(extension) => {
                label = labelled(NodeKind::Extension, id, &extension.label);
            }
            None => mark_missing(&mut metadata, &mut label, NodeKind::Extension, id),
        },
        TargetKind::OutboundRoute => match index.outbound_route(id) {
            Some(route) => {
                label = labelled(NodeKind::OutboundRoute, id, &route.label);
                metadata.insert("patterns".to_string(), route.patterns.join(" "));
                metadata.insert("trunks".to_string(), route.trunk_sequence.join(" "));
            }
            None => mark_missing(&mut metadata, &mut label, NodeKind::OutboundRoute, id),
        },
        TargetKind::Trunk => match index.trunk(id) {
            Some(trunk) => {
                label = labelled(NodeKind::Trunk, id, &trunk.label);
                metadata.insert("technology".to_string(), trunk.technology.clone());
                if trunk.disabled {
                    metadata.insert("disabled".to_string(), "true".to_string());
                }
            }
            None => mark_missing(&mut metadata, &mut label, NodeKind::Trunk, id),
        },
        TargetKind::Voicemail => {
            label = format!("Voicemail {id}");
            if let Some(mode) = dest.sub_selector.as_deref() {
                metadata.insert("greeting".to_string(), voicemail_mode(mode).to_string());
            }
        }
        TargetKind::Hangup => {
            label = "Hang Up".to_string();
        }
        TargetKind::Unknown => {
            label = "Unresolved destination".to_string();
            metadata.insert("raw".to_string(), dest.raw.clone());
        }
    }

    (
        FlowNode {
            key,
            label,
            metadata,
        },
        children,
    )
}

/// `"<Title> <id>: <label>"`, or just `"<Title> <id>"` without one.
fn labelled(kind: NodeKind, id: &str, label: &str) -> String {
    if label.is_empty() {
        format!("{} {id}", kind.title())
    } else {
        format!("{} {id}: {label}", kind.title())
    }
}

/// A destination that names an entity the snapshot does not contain.
/// The node still renders, flagged, as a terminal leaf.
fn mark_missing(
    metadata: &mut BTreeMap<String, String>,
    label: &mut String,
    kind: NodeKind,
    id: &str,
) {
    *label = format!("{} {id} (not in snapshot)", kind.title());
    metadata.insert("missing".to_string(), "true".to_string());
}

/// Branch label for an IVR selection: `t` and `i` are the timeout and
/// invalid-input pseudo-selections.
fn selection_branch(selection: &str) -> BranchLabel {
    match selection {
        "t" => BranchLabel::Timeout,
        "i" => BranchLabel::Invalid,
        other => BranchLabel::Digit(other.to_string()),
    }
}

/// Voicemail greeting mode letters from the mailbox id prefix.
fn voicemail_mode(mode: &str) -> &'static str {
    match mode {
        "u" => "unavailable",
        "b" => "busy",
        "s" => "no-message",
        _ => "default",
    }
}
