// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the behavior graph.

use crate::kinds::NodeKind;
use crate::port::{Port, PortDirection, Value};
use crate::target::TargetId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Runtime time-keeping for time-varying nodes.
///
/// `phase = (phase_offset + (now - origin) * rate) mod 1`. Re-anchoring
/// at a rate change keeps the waveform value continuous: the current
/// phase becomes the new offset and `origin` moves to `now`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAnchor {
    /// Time the current phase segment started
    pub origin: f64,
    /// Phase at `origin`, in [0, 1)
    pub phase_offset: f64,
    /// Time of the previous tick, for delta-time outputs
    pub last_tick: Option<f64>,
}

impl TimeAnchor {
    /// Anchor at `now` with zero phase
    pub fn starting_at(now: f64) -> Self {
        Self {
            origin: now,
            phase_offset: 0.0,
            last_tick: None,
        }
    }

    /// Phase in [0, 1) at `now` for a rate in cycles per second
    pub fn phase(&self, now: f64, cycles_per_second: f64) -> f64 {
        (self.phase_offset + (now - self.origin) * cycles_per_second).rem_euclid(1.0)
    }

    /// Move the origin to `now`, preserving the instantaneous phase
    /// produced by the old rate
    pub fn reanchor(&mut self, now: f64, old_cycles_per_second: f64) {
        self.phase_offset = self.phase(now, old_cycles_per_second);
        self.origin = now;
    }
}

impl Default for TimeAnchor {
    fn default() -> Self {
        Self::starting_at(0.0)
    }
}

/// A node instance in the graph
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Node kind with its parameters
    pub kind: NodeKind,
    /// Display name (can be customized)
    pub name: String,
    /// Position in the graph editor (layout metadata only)
    pub position: [f32; 2],
    /// Input ports
    pub inputs: Vec<Port>,
    /// Output ports
    pub outputs: Vec<Port>,
    /// Stable id of the bound target object (binding nodes only)
    pub bound_target: Option<TargetId>,
    /// Runtime phase/delta bookkeeping; not persisted
    pub anchor: TimeAnchor,
}

impl Node {
    /// Create a new node of the given kind, with its kind's fixed port
    /// schema, anchored at `now`
    pub fn new(kind: NodeKind, now: f64) -> Self {
        let (inputs, outputs) = kind.schema();
        Self {
            id: NodeId::new(),
            name: kind.tag().to_string(),
            kind,
            position: [0.0, 0.0],
            inputs,
            outputs,
            bound_target: None,
            anchor: TimeAnchor::starting_at(now),
        }
    }

    /// Set the editor position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    /// Bind this node to a target object by stable id
    pub fn with_target(mut self, target: TargetId) -> Self {
        self.bound_target = Some(target);
        self
    }

    /// Get an input port by name
    pub fn input(&self, name: &str) -> Option<&Port> {
        self.inputs.iter().find(|p| p.name == name)
    }

    /// Get a mutable input port by name
    pub fn input_mut(&mut self, name: &str) -> Option<&mut Port> {
        self.inputs.iter_mut().find(|p| p.name == name)
    }

    /// Get an output port by name
    pub fn output(&self, name: &str) -> Option<&Port> {
        self.outputs.iter().find(|p| p.name == name)
    }

    /// Get a mutable output port by name
    pub fn output_mut(&mut self, name: &str) -> Option<&mut Port> {
        self.outputs.iter_mut().find(|p| p.name == name)
    }

    /// Get a port by direction and name
    pub fn port(&self, direction: PortDirection, name: &str) -> Option<&Port> {
        match direction {
            PortDirection::Input => self.input(name),
            PortDirection::Output => self.output(name),
        }
    }

    /// Current value of an input port; a missing port reads as
    /// numeric zero
    pub fn input_value(&self, name: &str) -> Value {
        self.input(name)
            .map(|p| p.value.clone())
            .unwrap_or(Value::Number(0.0))
    }

    /// Input value read as a number; neutral 0.0 when not numeric
    pub fn input_number(&self, name: &str) -> f32 {
        self.input(name)
            .and_then(|p| p.value.as_number())
            .unwrap_or(0.0)
    }

    /// Input value read as a bool; neutral false when not boolean
    pub fn input_bool(&self, name: &str) -> bool {
        self.input(name)
            .and_then(|p| p.value.as_bool())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_fixed_by_kind() {
        let node = Node::new(NodeKind::Multiply, 0.0);
        assert_eq!(node.inputs.len(), 2);
        assert_eq!(node.outputs.len(), 1);
        assert!(node.input("A").is_some());
        assert!(node.input("B").is_some());
        assert!(node.output("Result").is_some());
    }

    #[test]
    fn anchor_phase_wraps() {
        let anchor = TimeAnchor::starting_at(10.0);
        let phase = anchor.phase(13.5, 1.0);
        assert!((phase - 0.5).abs() < 1e-9);
    }

    #[test]
    fn reanchor_preserves_phase() {
        let mut anchor = TimeAnchor::starting_at(0.0);
        let before = anchor.phase(2.25, 2.0);
        anchor.reanchor(2.25, 2.0);
        let after = anchor.phase(2.25, 7.0);
        assert!((before - after).abs() < 1e-9);
        assert_eq!(anchor.origin, 2.25);
    }
}
