//! The graph export interface.
//!
//! Read-only enumeration of nodes and edges for the rendering
//! collaborator. Layout, color, and file emission are entirely the
//! renderer's concern; nothing here mutates the graph.

use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::Serialize;

use crate::types::{CallFlowGraph, NodeKey};

/// One node as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportNode {
    pub kind: &'static str,
    pub id: String,
    pub label: String,
    pub metadata: std::collections::BTreeMap<String, String>,
}

/// One labeled edge between node keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ExportEdge {
    pub from: NodeKey,
    pub to: NodeKey,
    pub branch: String,
}

/// The complete serializable export document.
#[derive(Debug, Clone, Serialize)]
pub struct GraphExport {
    pub entry_did: String,
    pub truncated: bool,
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<ExportEdge>,
}

impl CallFlowGraph {
    /// All nodes, sorted by key for stable enumeration.
    pub fn nodes(&self) -> Vec<ExportNode> {
        let mut nodes: Vec<ExportNode> = self
            .graph
            .node_weights()
            .map(|node| ExportNode {
                kind: node.key.kind.as_str(),
                id: node.key.id.clone(),
                label: node.label.clone(),
                metadata: node.metadata.clone(),
            })
            .collect();
        nodes.sort_by(|a, b| (a.kind, &a.id).cmp(&(b.kind, &b.id)));
        nodes
    }

    /// All edges, sorted by (from, to, branch) for stable enumeration.
    pub fn edges(&self) -> Vec<ExportEdge> {
        let mut edges: Vec<ExportEdge> = self
            .graph
            .edge_references()
            .map(|edge| ExportEdge {
                from: self.graph[edge.source()].key.clone(),
                to: self.graph[edge.target()].key.clone(),
                branch: edge.weight().as_text(),
            })
            .collect();
        edges.sort();
        edges
    }

    /// Bundle everything a renderer needs into one document.
    pub fn to_export(&self) -> GraphExport {
        GraphExport {
            entry_did: self.entry_did().to_string(),
            truncated: self.is_truncated(),
            nodes: self.nodes(),
            edges: self.edges(),
        }
    }
}
