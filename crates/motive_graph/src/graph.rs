// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure and eager push propagation.
//!
//! There is no separate topological evaluation pass. Input-driven
//! changes propagate eagerly and synchronously: a changed output value
//! is pushed along every outgoing connection and the receiving node is
//! recomputed within the same call stack. Time-varying nodes are
//! re-driven by the scheduler tick. Cycles are permitted; a per-graph
//! in-flight set stops re-entrant recursion and the next tick
//! re-converges.

use crate::connection::Connection;
use crate::kinds::{self, ParamValue};
use crate::node::{Node, NodeId};
use crate::port::{coerce, Value, ValueType};
use crate::target::TargetStore;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Everything a compute cascade needs from the outside world: the
/// target-object store and the current time in seconds.
pub struct EvalContext<'a> {
    /// Resolves bound target ids to live objects
    pub targets: &'a mut dyn TargetStore,
    /// Current time, seconds on the scheduler's clock
    pub now: f64,
}

impl<'a> EvalContext<'a> {
    /// Create an evaluation context
    pub fn new(targets: &'a mut dyn TargetStore, now: f64) -> Self {
        Self { targets, now }
    }
}

/// Error from a graph mutation
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Node not found
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Port not found on the named node
    #[error("port {port:?} not found on node {node:?}")]
    PortNotFound {
        /// Owning node
        node: NodeId,
        /// Missing port name
        port: String,
    },

    /// Port types are incompatible under the conversion table
    #[error("cannot convert {from:?} into {to:?}")]
    TypeMismatch {
        /// Source output type
        from: ValueType,
        /// Target input type
        to: ValueType,
    },

    /// Connection not present in the graph
    #[error("connection not found")]
    ConnectionNotFound,
}

/// A behavior graph: nodes, connections, and the propagation engine
#[derive(Debug)]
pub struct Graph {
    /// Graph name
    pub name: String,
    nodes: IndexMap<NodeId, Node>,
    connections: Vec<Connection>,
    /// Nodes currently inside `compute`; the re-entrancy guard
    evaluating: HashSet<NodeId>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            connections: Vec::new(),
            evaluating: HashSet::new(),
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node: sever every connection touching it (resetting
    /// downstream inputs and recomputing their nodes), then drop it
    pub fn remove_node(&mut self, cx: &mut EvalContext<'_>, node_id: NodeId) -> Option<Node> {
        let severed: Vec<Connection> = self
            .connections
            .iter()
            .filter(|c| c.involves_node(node_id))
            .cloned()
            .collect();
        self.connections.retain(|c| !c.involves_node(node_id));

        for connection in severed {
            if connection.target_node != node_id {
                self.reset_input(&connection.target_node, &connection.target_port);
                self.compute_node(cx, connection.target_node);
            }
        }

        self.nodes.swap_remove(&node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get all connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter()
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// The connection currently feeding an input port, if any
    pub fn incoming(&self, node_id: NodeId, port: &str) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|c| c.target_node == node_id && c.target_port == port)
    }

    /// Connect an output port to an input port.
    ///
    /// Validation is all-or-nothing: nothing mutates on failure. An
    /// existing connection into the target input is replaced. On
    /// success the current output value is pushed into the input and
    /// the target node recomputes before this returns.
    pub fn connect(
        &mut self,
        cx: &mut EvalContext<'_>,
        source_node: NodeId,
        source_port: &str,
        target_node: NodeId,
        target_port: &str,
    ) -> Result<Connection, GraphError> {
        let source = self
            .nodes
            .get(&source_node)
            .ok_or(GraphError::NodeNotFound(source_node))?;
        let output = source.output(source_port).ok_or_else(|| GraphError::PortNotFound {
            node: source_node,
            port: source_port.to_string(),
        })?;
        let target = self
            .nodes
            .get(&target_node)
            .ok_or(GraphError::NodeNotFound(target_node))?;
        let input = target.input(target_port).ok_or_else(|| GraphError::PortNotFound {
            node: target_node,
            port: target_port.to_string(),
        })?;

        if !output.value_type.can_convert_to(input.value_type) {
            return Err(GraphError::TypeMismatch {
                from: output.value_type,
                to: input.value_type,
            });
        }
        let pushed = coerce(&output.value, input.value_type)
            .unwrap_or_else(|| Value::neutral(input.value_type));

        // Replace semantics: an input holds at most one incoming edge.
        self.connections
            .retain(|c| !(c.target_node == target_node && c.target_port == target_port));

        let connection = Connection::new(source_node, source_port, target_node, target_port);
        self.connections.push(connection.clone());

        if let Some(node) = self.nodes.get_mut(&target_node) {
            if let Some(port) = node.input_mut(target_port) {
                port.value = pushed;
            }
        }
        self.compute_node(cx, target_node);

        Ok(connection)
    }

    /// Remove a connection: the input reverts to its default and the
    /// target node recomputes once
    pub fn disconnect(
        &mut self,
        cx: &mut EvalContext<'_>,
        connection: &Connection,
    ) -> Result<(), GraphError> {
        let index = self
            .connections
            .iter()
            .position(|c| c == connection)
            .ok_or(GraphError::ConnectionNotFound)?;
        self.connections.remove(index);

        self.reset_input(&connection.target_node, &connection.target_port);
        self.compute_node(cx, connection.target_node);
        Ok(())
    }

    /// Set the literal value of an input port (an editor edit). The
    /// value becomes the port's default, and for an unconnected input
    /// also its current value; the node recomputes immediately.
    pub fn set_input_value(
        &mut self,
        cx: &mut EvalContext<'_>,
        node_id: NodeId,
        port: &str,
        value: Value,
    ) -> Result<(), GraphError> {
        let connected = self.incoming(node_id, port).is_some();
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        let input = node.input_mut(port).ok_or_else(|| GraphError::PortNotFound {
            node: node_id,
            port: port.to_string(),
        })?;
        let value = coerce(&value, input.value_type).ok_or(GraphError::TypeMismatch {
            from: value.value_type(),
            to: input.value_type,
        })?;

        input.default = Some(value.clone());
        if !connected {
            input.value = value;
        }
        self.compute_node(cx, node_id);
        Ok(())
    }

    /// Apply a node parameter. A rate (`speed`) change on an
    /// oscillator re-anchors its phase so the waveform value stays
    /// continuous; the node then recomputes and propagates.
    pub fn set_param(
        &mut self,
        cx: &mut EvalContext<'_>,
        node_id: NodeId,
        name: &str,
        value: ParamValue,
    ) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;

        let old_rate = node.kind.rate();
        if !node.kind.set_param(name, value) {
            tracing::warn!(node = ?node_id, param = name, "ignoring unknown or mistyped parameter");
            return Ok(());
        }
        if name == "speed" {
            if let Some(old_rate) = old_rate {
                node.anchor.reanchor(cx.now, f64::from(old_rate) / 60.0);
            }
        }
        self.compute_node(cx, node_id);
        Ok(())
    }

    /// Pull the bound object's current property values back into a
    /// binding node's input defaults, so external edits (viewport
    /// manipulation) are adopted instead of fought.
    pub fn sync_from_target(
        &mut self,
        cx: &mut EvalContext<'_>,
        node_id: NodeId,
    ) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get(&node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        let kind = node.kind.clone();
        let Some(target_id) = node.bound_target else {
            return Ok(());
        };
        let Some(object) = cx.targets.resolve(target_id) else {
            tracing::debug!(node = ?node_id, target = ?target_id, "sync skipped, target did not resolve");
            return Ok(());
        };
        let pulled = kinds::binding::pull_values(&kind, object);

        for (port, value) in pulled {
            let connected = self.incoming(node_id, port).is_some();
            if let Some(node) = self.nodes.get_mut(&node_id) {
                if let Some(input) = node.input_mut(port) {
                    input.default = Some(value.clone());
                    if !connected {
                        input.value = value;
                    }
                }
            }
        }
        self.compute_node(cx, node_id);
        Ok(())
    }

    /// One scheduler tick: recompute every time-varying node, which
    /// re-triggers push propagation through its dependents
    pub fn tick(&mut self, cx: &mut EvalContext<'_>) {
        let live: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.kind.is_time_varying())
            .map(|(id, _)| *id)
            .collect();
        for id in live {
            self.compute_node(cx, id);
        }
    }

    /// Run one compute step for every node, in insertion order. Used
    /// after deserialization so load produces no unanimated frame.
    pub fn compute_all(&mut self, cx: &mut EvalContext<'_>) {
        let ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        for id in ids {
            self.compute_node(cx, id);
        }
    }

    /// Run a node's compute step and propagate its output writes.
    ///
    /// A node already mid-compute ignores the re-entrant call; the
    /// next scheduler tick reaches the fixed point instead.
    pub fn compute_node(&mut self, cx: &mut EvalContext<'_>, node_id: NodeId) {
        if self.evaluating.contains(&node_id) {
            tracing::debug!(node = ?node_id, "re-entrant compute skipped");
            return;
        }
        self.evaluating.insert(node_id);

        let writes = match self.nodes.get_mut(&node_id) {
            Some(node) => kinds::compute(node, cx),
            None => Vec::new(),
        };
        for (port, value) in writes {
            self.write_output(cx, node_id, port, value);
        }

        self.evaluating.remove(&node_id);
    }

    /// Store an output value; when it changed, push it along every
    /// outgoing connection and recompute each receiving node, eagerly
    /// and synchronously.
    fn write_output(&mut self, cx: &mut EvalContext<'_>, node_id: NodeId, port: &str, value: Value) {
        {
            let Some(node) = self.nodes.get_mut(&node_id) else {
                return;
            };
            let Some(output) = node.output_mut(port) else {
                return;
            };
            if output.value == value {
                return;
            }
            output.value = value.clone();
        }

        let edges: Vec<(NodeId, String)> = self
            .connections
            .iter()
            .filter(|c| c.source_node == node_id && c.source_port == port)
            .map(|c| (c.target_node, c.target_port.clone()))
            .collect();

        for (target_node, target_port) in edges {
            let updated = self.nodes.get_mut(&target_node).is_some_and(|node| {
                node.input_mut(&target_port).is_some_and(|input| {
                    match coerce(&value, input.value_type) {
                        Some(coerced) => {
                            input.value = coerced;
                            true
                        }
                        None => false,
                    }
                })
            });
            if updated {
                self.compute_node(cx, target_node);
            }
        }
    }

    fn reset_input(&mut self, node_id: &NodeId, port: &str) {
        if let Some(node) = self.nodes.get_mut(node_id) {
            if let Some(input) = node.input_mut(port) {
                input.value = input.resting_value();
            }
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
