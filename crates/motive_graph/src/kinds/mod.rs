// SPDX-License-Identifier: MIT OR Apache-2.0
//! The node kind catalog.
//!
//! Kinds form a closed tagged variant: each kind fixes a port schema,
//! a parameter set, and a compute step. The families live in
//! submodules (`time`, `oscillator`, `math`, `binding`).

pub mod binding;
pub mod math;
pub mod oscillator;
pub mod time;

use crate::graph::EvalContext;
use crate::node::Node;
use crate::port::{Port, Value, ValueType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A plain (non-port) node parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean parameter
    Bool(bool),
    /// Numeric parameter
    Number(f32),
}

impl ParamValue {
    fn number(&self) -> Option<f32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(_) => None,
        }
    }

    fn bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Number(_) => None,
        }
    }
}

/// A node kind together with its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Continuous time source
    Time {
        /// Time scale factor
        speed: f32,
    },
    /// Vertical bobbing offset
    Bob {
        /// Rate in cycles per minute
        speed: f32,
        /// Peak offset from rest
        distance: f32,
    },
    /// Continuous rotation
    Spin {
        /// Rate in revolutions per minute
        speed: f32,
        /// Rotation direction
        clockwise: bool,
    },
    /// Opacity oscillation
    Fade {
        /// Rate in cycles per minute
        speed: f32,
        /// Opacity at the waveform trough
        min: f32,
        /// Opacity at the waveform peak
        max: f32,
    },
    /// Scale oscillation
    Pulse {
        /// Rate in cycles per minute
        speed: f32,
        /// Scale at the waveform trough
        min: f32,
        /// Scale at the waveform peak
        max: f32,
    },
    /// Numeric product of two inputs
    Multiply,
    /// Drives the bound object's position
    TargetPosition,
    /// Drives the bound object's rotation
    TargetRotation,
    /// Drives the bound object's scale
    TargetScale,
    /// Drives the bound object's visibility
    TargetVisibility,
    /// Drives the bound object's opacity
    TargetOpacity,
}

impl NodeKind {
    /// The persisted kind tag
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Time { .. } => "Time",
            Self::Bob { .. } => "Bob",
            Self::Spin { .. } => "Spin",
            Self::Fade { .. } => "Fade",
            Self::Pulse { .. } => "Pulse",
            Self::Multiply => "Multiply",
            Self::TargetPosition => "TargetPosition",
            Self::TargetRotation => "TargetRotation",
            Self::TargetScale => "TargetScale",
            Self::TargetVisibility => "TargetVisibility",
            Self::TargetOpacity => "TargetOpacity",
        }
    }

    /// A kind with its default parameters, from a persisted tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Time" => Some(Self::Time { speed: 1.0 }),
            "Bob" => Some(Self::Bob {
                speed: 30.0,
                distance: 1.0,
            }),
            "Spin" => Some(Self::Spin {
                speed: 60.0,
                clockwise: true,
            }),
            "Fade" => Some(Self::Fade {
                speed: 30.0,
                min: 0.0,
                max: 1.0,
            }),
            "Pulse" => Some(Self::Pulse {
                speed: 30.0,
                min: 0.8,
                max: 1.2,
            }),
            "Multiply" => Some(Self::Multiply),
            "TargetPosition" => Some(Self::TargetPosition),
            "TargetRotation" => Some(Self::TargetRotation),
            "TargetScale" => Some(Self::TargetScale),
            "TargetVisibility" => Some(Self::TargetVisibility),
            "TargetOpacity" => Some(Self::TargetOpacity),
            _ => None,
        }
    }

    /// Whether this kind is recomputed on every scheduler tick
    pub fn is_time_varying(&self) -> bool {
        matches!(
            self,
            Self::Time { .. }
                | Self::Bob { .. }
                | Self::Spin { .. }
                | Self::Fade { .. }
                | Self::Pulse { .. }
        )
    }

    /// Whether this kind writes properties of a bound target object
    pub fn is_binding(&self) -> bool {
        matches!(
            self,
            Self::TargetPosition
                | Self::TargetRotation
                | Self::TargetScale
                | Self::TargetVisibility
                | Self::TargetOpacity
        )
    }

    /// The periodic rate in cycles per minute, for kinds that have one
    pub fn rate(&self) -> Option<f32> {
        match self {
            Self::Bob { speed, .. }
            | Self::Spin { speed, .. }
            | Self::Fade { speed, .. }
            | Self::Pulse { speed, .. } => Some(*speed),
            _ => None,
        }
    }

    /// The fixed port schema for this kind: `(inputs, outputs)`
    pub fn schema(&self) -> (Vec<Port>, Vec<Port>) {
        let n = ValueType::Number;
        match self {
            Self::Time { .. } => (
                vec![],
                vec![
                    Port::output("Time", n),
                    Port::output("Delta", n),
                    Port::output("Sin", n),
                    Port::output("Cos", n),
                ],
            ),
            Self::Bob { .. } => (vec![], vec![Port::output("Offset", n)]),
            Self::Spin { .. } => (vec![], vec![Port::output("Rotation", n)]),
            Self::Fade { .. } => (vec![], vec![Port::output("Opacity", n)]),
            Self::Pulse { .. } => (vec![], vec![Port::output("Scale", n)]),
            Self::Multiply => (
                vec![
                    Port::input("A", n, Value::Number(1.0)),
                    Port::input("B", n, Value::Number(1.0)),
                ],
                vec![Port::output("Result", n)],
            ),
            Self::TargetPosition | Self::TargetRotation => (
                component_inputs(0.0),
                vec![Port::output("X", n), Port::output("Y", n), Port::output("Z", n)],
            ),
            Self::TargetScale => (
                component_inputs(1.0),
                vec![Port::output("X", n), Port::output("Y", n), Port::output("Z", n)],
            ),
            Self::TargetVisibility => (
                vec![Port::input("Visible", ValueType::Bool, Value::Bool(true))],
                vec![Port::output("Visible", ValueType::Bool)],
            ),
            Self::TargetOpacity => (
                vec![Port::input("Opacity", n, Value::Number(1.0))],
                vec![Port::output("Opacity", n)],
            ),
        }
    }

    /// Parameters as a named map, in schema order
    pub fn params(&self) -> IndexMap<String, ParamValue> {
        let mut map = IndexMap::new();
        match self {
            Self::Time { speed } => {
                map.insert("speed".to_string(), ParamValue::Number(*speed));
            }
            Self::Bob { speed, distance } => {
                map.insert("speed".to_string(), ParamValue::Number(*speed));
                map.insert("distance".to_string(), ParamValue::Number(*distance));
            }
            Self::Spin { speed, clockwise } => {
                map.insert("speed".to_string(), ParamValue::Number(*speed));
                map.insert("clockwise".to_string(), ParamValue::Bool(*clockwise));
            }
            Self::Fade { speed, min, max } | Self::Pulse { speed, min, max } => {
                map.insert("speed".to_string(), ParamValue::Number(*speed));
                map.insert("min".to_string(), ParamValue::Number(*min));
                map.insert("max".to_string(), ParamValue::Number(*max));
            }
            Self::Multiply
            | Self::TargetPosition
            | Self::TargetRotation
            | Self::TargetScale
            | Self::TargetVisibility
            | Self::TargetOpacity => {}
        }
        map
    }

    /// Rebuild a kind from its persisted tag and parameter map.
    ///
    /// Missing parameters keep their defaults; unknown tags yield
    /// `None`.
    pub fn from_params(tag: &str, params: &IndexMap<String, ParamValue>) -> Option<Self> {
        let mut kind = Self::from_tag(tag)?;
        for (name, value) in params {
            kind.set_param(name, value.clone());
        }
        Some(kind)
    }

    /// Apply a single parameter; returns false for an unknown name or
    /// a type-incompatible value
    pub fn set_param(&mut self, name: &str, value: ParamValue) -> bool {
        match (self, name) {
            (Self::Time { speed }, "speed")
            | (Self::Bob { speed, .. }, "speed")
            | (Self::Spin { speed, .. }, "speed")
            | (Self::Fade { speed, .. }, "speed")
            | (Self::Pulse { speed, .. }, "speed") => assign_number(speed, value),
            (Self::Bob { distance, .. }, "distance") => assign_number(distance, value),
            (Self::Spin { clockwise, .. }, "clockwise") => assign_bool(clockwise, value),
            (Self::Fade { min, .. }, "min") | (Self::Pulse { min, .. }, "min") => {
                assign_number(min, value)
            }
            (Self::Fade { max, .. }, "max") | (Self::Pulse { max, .. }, "max") => {
                assign_number(max, value)
            }
            _ => false,
        }
    }
}

fn component_inputs(default: f32) -> Vec<Port> {
    vec![
        Port::input("X", ValueType::Number, Value::Number(default)),
        Port::input("Y", ValueType::Number, Value::Number(default)),
        Port::input("Z", ValueType::Number, Value::Number(default)),
    ]
}

fn assign_number(slot: &mut f32, value: ParamValue) -> bool {
    match value.number() {
        Some(n) => {
            *slot = n;
            true
        }
        None => false,
    }
}

fn assign_bool(slot: &mut bool, value: ParamValue) -> bool {
    match value.bool() {
        Some(b) => {
            *slot = b;
            true
        }
        None => false,
    }
}

/// Run one compute step for `node`, returning the output writes the
/// graph must propagate.
///
/// Binding kinds apply their side effect on the bound target object
/// here, before the writes are returned, so the object is mutated
/// before propagation continues.
pub(crate) fn compute(node: &mut Node, cx: &mut EvalContext<'_>) -> Vec<(&'static str, Value)> {
    match &node.kind {
        NodeKind::Time { .. } => time::compute(node, cx),
        NodeKind::Bob { .. } | NodeKind::Spin { .. } | NodeKind::Fade { .. } | NodeKind::Pulse { .. } => {
            oscillator::compute(node, cx)
        }
        NodeKind::Multiply => math::compute(node),
        _ => binding::compute(node, cx),
    }
}
