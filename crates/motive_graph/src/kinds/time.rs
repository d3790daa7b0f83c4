// SPDX-License-Identifier: MIT OR Apache-2.0
//! The continuous time source node.

use crate::graph::EvalContext;
use crate::kinds::NodeKind;
use crate::node::Node;
use crate::port::Value;

pub(crate) fn compute(node: &mut Node, cx: &mut EvalContext<'_>) -> Vec<(&'static str, Value)> {
    let NodeKind::Time { speed } = node.kind else {
        return vec![];
    };
    let elapsed = (cx.now - node.anchor.origin) * f64::from(speed);
    let delta = node
        .anchor
        .last_tick
        .map_or(0.0, |last| (cx.now - last) * f64::from(speed));
    node.anchor.last_tick = Some(cx.now);

    vec![
        ("Time", Value::Number(elapsed as f32)),
        ("Delta", Value::Number(delta as f32)),
        ("Sin", Value::Number(elapsed.sin() as f32)),
        ("Cos", Value::Number(elapsed.cos() as f32)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::NoTargets;

    fn outputs_at(node: &mut Node, now: f64) -> Vec<(&'static str, Value)> {
        let mut targets = NoTargets;
        let mut cx = EvalContext {
            targets: &mut targets,
            now,
        };
        compute(node, &mut cx)
    }

    #[test]
    fn elapsed_scales_with_speed() {
        let mut node = Node::new(NodeKind::Time { speed: 2.0 }, 0.0);
        let out = outputs_at(&mut node, 1.5);
        assert_eq!(out[0], ("Time", Value::Number(3.0)));
    }

    #[test]
    fn delta_tracks_previous_tick() {
        let mut node = Node::new(NodeKind::Time { speed: 1.0 }, 0.0);
        let first = outputs_at(&mut node, 0.5);
        assert_eq!(first[1], ("Delta", Value::Number(0.0)));
        let second = outputs_at(&mut node, 0.75);
        assert_eq!(second[1], ("Delta", Value::Number(0.25)));
    }
}
