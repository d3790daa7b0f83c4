// SPDX-License-Identifier: MIT OR Apache-2.0
//! The persisted graph document.
//!
//! The document is the exact round-trip form of a graph: per node its
//! id, kind tag, editor position, parameter map, and bound-target ref;
//! plus the connection list. Runtime state (port values, phase
//! anchors) is never persisted; a restore ends with one full compute
//! pass so the loaded graph is live immediately.

use crate::connection::Connection;
use crate::graph::{EvalContext, Graph};
use crate::kinds::{NodeKind, ParamValue};
use crate::node::{Node, NodeId};
use crate::target::TargetId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Editor position of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocPosition {
    /// Horizontal editor coordinate
    pub x: f32,
    /// Vertical editor coordinate
    pub y: f32,
}

/// One node as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Stable node id
    pub id: NodeId,
    /// Kind tag
    pub kind: String,
    /// Editor position
    pub position: DocPosition,
    /// Parameters, in schema order
    pub parameters: IndexMap<String, ParamValue>,
    /// Bound target ref, relinked by stable identity on load
    pub bound_target: Option<TargetId>,
}

/// A serialized graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// All nodes
    pub nodes: Vec<NodeRecord>,
    /// All connections
    pub connections: Vec<Connection>,
}

/// Error encoding or decoding a document blob
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The blob is not a valid document
    #[error("malformed graph document: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl GraphDocument {
    /// Capture a graph into its persisted form
    pub fn capture(graph: &Graph) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| NodeRecord {
                id: node.id,
                kind: node.kind.tag().to_string(),
                position: DocPosition {
                    x: node.position[0],
                    y: node.position[1],
                },
                parameters: node.kind.params(),
                bound_target: node.bound_target,
            })
            .collect();
        let connections = graph.connections().cloned().collect();
        Self { nodes, connections }
    }

    /// Rebuild a live graph from this document.
    ///
    /// Nodes are reconstructed from their kind's fixed schema first;
    /// an unknown kind is skipped with a warning. Bound target refs
    /// are then relinked through the store (a miss loads the node
    /// unbound). Connections come next, also warn-and-skip on bad
    /// endpoints. Finally every node computes once, so outputs and
    /// applied target properties reflect the loaded parameters with no
    /// unanimated frame.
    pub fn restore(&self, cx: &mut EvalContext<'_>) -> Graph {
        let mut graph = Graph::default();

        for record in &self.nodes {
            let Some(kind) = NodeKind::from_params(&record.kind, &record.parameters) else {
                tracing::warn!(kind = %record.kind, "skipping node of unknown kind");
                continue;
            };
            let mut node = Node::new(kind, cx.now);
            node.id = record.id;
            node.position = [record.position.x, record.position.y];
            if let Some(target) = record.bound_target {
                if cx.targets.resolve(target).is_some() {
                    node.bound_target = Some(target);
                } else {
                    tracing::warn!(?target, "bound target unresolved; node loads unbound");
                }
            }
            graph.add_node(node);
        }

        for connection in &self.connections {
            if let Err(err) = graph.connect(
                cx,
                connection.source_node,
                &connection.source_port,
                connection.target_node,
                &connection.target_port,
            ) {
                tracing::warn!(%err, "skipping connection");
            }
        }

        graph.compute_all(cx);
        graph
    }

    /// Encode to an opaque JSON blob for the persistence surface
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from an opaque JSON blob
    pub fn from_json(blob: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(blob)?)
    }
}
