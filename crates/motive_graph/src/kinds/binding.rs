// SPDX-License-Identifier: MIT OR Apache-2.0
//! Target-property binding nodes.
//!
//! A binding node applies its resolved input values onto the bound
//! target object as a side effect of `compute`, then mirrors the same
//! values on its outputs. A node with no bound target, or whose id no
//! longer resolves, is a safe no-op.

use crate::graph::EvalContext;
use crate::kinds::NodeKind;
use crate::node::Node;
use crate::port::Value;
use crate::target::TargetObject;

pub(crate) fn compute(node: &mut Node, cx: &mut EvalContext<'_>) -> Vec<(&'static str, Value)> {
    let writes = mirrored_outputs(node);

    if let Some(target_id) = node.bound_target {
        if let Some(object) = cx.targets.resolve(target_id) {
            apply(node, object);
        } else {
            tracing::debug!(node = ?node.id, target = ?target_id, "bound target did not resolve");
        }
    }

    writes
}

fn mirrored_outputs(node: &Node) -> Vec<(&'static str, Value)> {
    match node.kind {
        NodeKind::TargetPosition | NodeKind::TargetRotation | NodeKind::TargetScale => vec![
            ("X", Value::Number(node.input_number("X"))),
            ("Y", Value::Number(node.input_number("Y"))),
            ("Z", Value::Number(node.input_number("Z"))),
        ],
        NodeKind::TargetVisibility => vec![("Visible", Value::Bool(node.input_bool("Visible")))],
        NodeKind::TargetOpacity => vec![("Opacity", Value::Number(node.input_number("Opacity")))],
        _ => vec![],
    }
}

fn apply(node: &Node, object: &mut dyn TargetObject) {
    let components = || {
        [
            node.input_number("X"),
            node.input_number("Y"),
            node.input_number("Z"),
        ]
    };
    match node.kind {
        NodeKind::TargetPosition => object.set_position(components()),
        NodeKind::TargetRotation => object.set_rotation(components()),
        NodeKind::TargetScale => object.set_scale(components()),
        NodeKind::TargetVisibility => object.set_visible(node.input_bool("Visible")),
        NodeKind::TargetOpacity => object.set_opacity(node.input_number("Opacity")),
        _ => return,
    }
    object.mark_dirty();
}

/// Read the bound object's current property values, keyed by the input
/// port names they correspond to.
///
/// Used by `Graph::sync_from_target` to adopt external edits (e.g.
/// direct viewport manipulation) into the node's input defaults.
pub(crate) fn pull_values(kind: &NodeKind, object: &dyn TargetObject) -> Vec<(&'static str, Value)> {
    let components = |v: [f32; 3]| {
        vec![
            ("X", Value::Number(v[0])),
            ("Y", Value::Number(v[1])),
            ("Z", Value::Number(v[2])),
        ]
    };
    match kind {
        NodeKind::TargetPosition => components(object.position()),
        NodeKind::TargetRotation => components(object.rotation()),
        NodeKind::TargetScale => components(object.scale()),
        NodeKind::TargetVisibility => vec![("Visible", Value::Bool(object.visible()))],
        NodeKind::TargetOpacity => vec![("Opacity", Value::Number(object.opacity()))],
        _ => vec![],
    }
}
