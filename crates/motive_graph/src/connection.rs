// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions for the graph.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// A directed edge from one output port to one input port.
///
/// The four endpoint names are the connection's identity; there is no
/// separate edge id, matching the persisted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Source node ID
    pub source_node: NodeId,
    /// Source output port name
    pub source_port: String,
    /// Target node ID
    pub target_node: NodeId,
    /// Target input port name
    pub target_port: String,
}

impl Connection {
    /// Create a new connection
    pub fn new(
        source_node: NodeId,
        source_port: impl Into<String>,
        target_node: NodeId,
        target_port: impl Into<String>,
    ) -> Self {
        Self {
            source_node,
            source_port: source_port.into(),
            target_node,
            target_port: target_port.into(),
        }
    }

    /// Check if this connection involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.source_node == node_id || self.target_node == node_id
    }
}
