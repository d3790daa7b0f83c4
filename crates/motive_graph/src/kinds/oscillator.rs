// SPDX-License-Identifier: MIT OR Apache-2.0
//! The periodic motion family: Bob, Spin, Fade, Pulse.
//!
//! All four share one phase model: `speed` is expressed in cycles per
//! minute and `phase` advances as `elapsed * speed / 60`, wrapped to
//! [0, 1). The raised-cosine kinds (Fade, Pulse) place their trough
//! exactly at phase 0, so a freshly created node starts at `min`.

use crate::graph::EvalContext;
use crate::kinds::NodeKind;
use crate::node::Node;
use crate::port::Value;

const TAU: f64 = std::f64::consts::TAU;

/// `min` at phase 0 and 1, `max` at phase 0.5, C1-continuous.
fn raised_cosine(phase: f64, min: f32, max: f32) -> f32 {
    let blend = (1.0 - (TAU * phase).cos()) * 0.5;
    min + (max - min) * blend as f32
}

pub(crate) fn compute(node: &mut Node, cx: &mut EvalContext<'_>) -> Vec<(&'static str, Value)> {
    let Some(rate_cpm) = node.kind.rate() else {
        return vec![];
    };
    let phase = node.anchor.phase(cx.now, f64::from(rate_cpm) / 60.0);
    node.anchor.last_tick = Some(cx.now);

    match node.kind {
        NodeKind::Bob { distance, .. } => {
            let offset = distance * (TAU * phase).sin() as f32;
            vec![("Offset", Value::Number(offset))]
        }
        NodeKind::Spin { clockwise, .. } => {
            let sign = if clockwise { 1.0 } else { -1.0 };
            let rotation = sign * (TAU * phase) as f32;
            vec![("Rotation", Value::Number(rotation))]
        }
        NodeKind::Fade { min, max, .. } => {
            vec![("Opacity", Value::Number(raised_cosine(phase, min, max)))]
        }
        NodeKind::Pulse { min, max, .. } => {
            vec![("Scale", Value::Number(raised_cosine(phase, min, max)))]
        }
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::NoTargets;

    fn output_at(node: &mut Node, now: f64) -> f32 {
        let mut targets = NoTargets;
        let mut cx = EvalContext {
            targets: &mut targets,
            now,
        };
        let out = compute(node, &mut cx);
        match out[0].1 {
            Value::Number(n) => n,
            _ => panic!("oscillator output must be numeric"),
        }
    }

    #[test]
    fn spin_reaches_pi_after_half_second_at_60_rpm() {
        // 60 RPM = 1 rev/sec = 2π rad/sec; at 0.5 s the angle is π.
        let mut node = Node::new(
            NodeKind::Spin {
                speed: 60.0,
                clockwise: true,
            },
            0.0,
        );
        let rotation = output_at(&mut node, 0.5);
        assert!((rotation - std::f32::consts::PI).abs() < 1e-5);
    }

    #[test]
    fn counterclockwise_spin_is_negative() {
        let mut node = Node::new(
            NodeKind::Spin {
                speed: 60.0,
                clockwise: false,
            },
            0.0,
        );
        assert!(output_at(&mut node, 0.25) < 0.0);
    }

    #[test]
    fn fade_starts_at_min() {
        let mut node = Node::new(
            NodeKind::Fade {
                speed: 30.0,
                min: 0.0,
                max: 1.0,
            },
            0.0,
        );
        assert!(output_at(&mut node, 0.0).abs() < 1e-6);
    }

    #[test]
    fn fade_stays_within_declared_range() {
        let mut node = Node::new(
            NodeKind::Fade {
                speed: 47.0,
                min: 0.25,
                max: 0.75,
            },
            0.0,
        );
        for i in 0..2000 {
            let value = output_at(&mut node, f64::from(i) * 0.0173);
            assert!((0.25..=0.75).contains(&value), "out of range at step {i}");
        }
    }

    #[test]
    fn bob_stays_within_amplitude() {
        let mut node = Node::new(
            NodeKind::Bob {
                speed: 90.0,
                distance: 2.5,
            },
            0.0,
        );
        for i in 0..2000 {
            let value = output_at(&mut node, f64::from(i) * 0.031);
            assert!(value.abs() <= 2.5 + 1e-5);
        }
    }

    #[test]
    fn waveform_continuous_across_rate_change() {
        let mut node = Node::new(
            NodeKind::Fade {
                speed: 30.0,
                min: 0.0,
                max: 1.0,
            },
            0.0,
        );
        let at_change = output_at(&mut node, 0.73);

        // The rate change re-anchors the phase so the value holds.
        let old_rate = node.kind.rate().unwrap();
        assert!(node.kind.set_param("speed", crate::kinds::ParamValue::Number(120.0)));
        node.anchor.reanchor(0.73, f64::from(old_rate) / 60.0);

        let after_change = output_at(&mut node, 0.73);
        assert!((at_change - after_change).abs() < 1e-5);

        // And stays bounded as the faster rate takes over.
        for i in 1..200 {
            let value = output_at(&mut node, 0.73 + f64::from(i) * 0.005);
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
