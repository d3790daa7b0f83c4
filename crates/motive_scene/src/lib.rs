// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene-side collaborators for the Motive behavior graph engine:
//! the object store binding nodes drive, and the opaque document
//! library graphs persist into.

pub mod library;
pub mod object;
pub mod scene;

pub use library::{DocumentLibrary, SceneId};
pub use object::{SceneObject, Transform};
pub use scene::Scene;

#[cfg(test)]
mod tests {
    use super::*;
    use motive_graph::{
        EvalContext, Graph, GraphDocument, Node, NodeKind, ParamValue, Scheduler, Value,
    };

    fn scene_with_cube() -> (Scene, motive_graph::TargetId) {
        let mut scene = Scene::new();
        let cube = scene.spawn(SceneObject::new("Cube"));
        (scene, cube)
    }

    #[test]
    fn setting_an_input_mutates_the_object_synchronously() {
        let (mut scene, cube) = scene_with_cube();
        let mut graph = Graph::new("test");
        let node = graph.add_node(Node::new(NodeKind::TargetPosition, 0.0).with_target(cube));

        let mut cx = EvalContext::new(&mut scene, 0.0);
        graph
            .set_input_value(&mut cx, node, "Y", Value::Number(4.0))
            .unwrap();

        // Mutated before the call returned.
        let object = scene.get(cube).unwrap();
        assert_eq!(object.transform.position, [0.0, 4.0, 0.0]);
        assert!(object.dirty);
    }

    #[test]
    fn unbound_and_stale_bindings_are_inert() {
        let (mut scene, cube) = scene_with_cube();
        let mut graph = Graph::new("test");
        let node = graph.add_node(Node::new(NodeKind::TargetOpacity, 0.0).with_target(cube));

        scene.remove(cube);
        let mut cx = EvalContext::new(&mut scene, 0.0);
        graph
            .set_input_value(&mut cx, node, "Opacity", Value::Number(0.25))
            .unwrap();
        // No panic, no effect; the node simply stopped applying.
        assert!(scene.is_empty());
    }

    #[test]
    fn sync_from_target_adopts_external_edits() {
        let (mut scene, cube) = scene_with_cube();
        let mut graph = Graph::new("test");
        let node = graph.add_node(Node::new(NodeKind::TargetScale, 0.0).with_target(cube));

        // Direct manipulation outside the graph.
        scene.get_mut(cube).unwrap().transform.scale = [2.0, 3.0, 4.0];

        let mut cx = EvalContext::new(&mut scene, 0.0);
        graph.sync_from_target(&mut cx, node).unwrap();

        let synced = graph.node(node).unwrap();
        assert_eq!(synced.input_value("X"), Value::Number(2.0));
        assert_eq!(synced.input_value("Y"), Value::Number(3.0));
        assert_eq!(synced.input_value("Z"), Value::Number(4.0));
        // The recompute re-applied the same values; nothing fought back.
        assert_eq!(scene.get(cube).unwrap().transform.scale, [2.0, 3.0, 4.0]);
    }

    #[test]
    fn spin_chain_rotates_the_object_under_the_scheduler() {
        let (mut scene, cube) = scene_with_cube();
        let mut graph = Graph::new("test");
        let mut scheduler = Scheduler::new();

        let spin = graph.add_node(Node::new(
            NodeKind::Spin {
                speed: 60.0,
                clockwise: true,
            },
            0.0,
        ));
        let rotation = graph.add_node(Node::new(NodeKind::TargetRotation, 0.0).with_target(cube));
        {
            let mut cx = scheduler.context(&mut scene);
            graph.connect(&mut cx, spin, "Rotation", rotation, "Z").unwrap();
        }

        scheduler.advance(0.5, &mut graph, &mut scene);

        let object = scene.get(cube).unwrap();
        assert!((object.transform.rotation[2] - std::f32::consts::PI).abs() < 1e-5);
        assert!(object.dirty);
    }

    #[test]
    fn fade_drives_opacity_between_min_and_max() {
        let (mut scene, cube) = scene_with_cube();
        let mut graph = Graph::new("test");
        let mut scheduler = Scheduler::new();

        let fade = graph.add_node(Node::new(
            NodeKind::Fade {
                speed: 30.0,
                min: 0.1,
                max: 0.9,
            },
            0.0,
        ));
        let opacity = graph.add_node(Node::new(NodeKind::TargetOpacity, 0.0).with_target(cube));
        {
            let mut cx = scheduler.context(&mut scene);
            graph.connect(&mut cx, fade, "Opacity", opacity, "Opacity").unwrap();
        }

        for _ in 0..300 {
            scheduler.step(&mut graph, &mut scene);
            let value = scene.get(cube).unwrap().opacity;
            assert!((0.1..=0.9).contains(&value));
        }
    }

    #[test]
    fn visibility_binding_applies_bools() {
        let (mut scene, cube) = scene_with_cube();
        let mut graph = Graph::new("test");
        let node = graph.add_node(Node::new(NodeKind::TargetVisibility, 0.0).with_target(cube));

        let mut cx = EvalContext::new(&mut scene, 0.0);
        graph
            .set_input_value(&mut cx, node, "Visible", Value::Bool(false))
            .unwrap();
        assert!(!scene.get(cube).unwrap().visible);
    }

    #[test]
    fn document_relinks_against_the_scene_and_applies_on_load() {
        let (mut scene, cube) = scene_with_cube();
        let blob;
        {
            let mut graph = Graph::new("authored");
            let fade = graph.add_node(Node::new(
                NodeKind::Fade {
                    speed: 30.0,
                    min: 0.3,
                    max: 0.8,
                },
                0.0,
            ));
            let opacity = graph.add_node(Node::new(NodeKind::TargetOpacity, 0.0).with_target(cube));
            let mut cx = EvalContext::new(&mut scene, 0.0);
            graph.connect(&mut cx, fade, "Opacity", opacity, "Opacity").unwrap();

            blob = GraphDocument::capture(&graph).to_json().unwrap();
        }

        // Persist round trip through the library, then load against the
        // same scene.
        let mut library = DocumentLibrary::new();
        let scene_id = SceneId::new();
        library.store(scene_id, blob);

        let doc = GraphDocument::from_json(library.load(scene_id).unwrap()).unwrap();
        let mut cx = EvalContext::new(&mut scene, 0.0);
        let restored = doc.restore(&mut cx);

        let bound = restored
            .nodes()
            .find(|n| n.kind == NodeKind::TargetOpacity)
            .unwrap();
        assert_eq!(bound.bound_target, Some(cube));
        // The load-time compute pass applied the fade trough already.
        assert!((scene.get(cube).unwrap().opacity - 0.3).abs() < 1e-6);
    }

    #[test]
    fn rate_edit_keeps_driven_opacity_continuous() {
        let (mut scene, cube) = scene_with_cube();
        let mut graph = Graph::new("test");
        let mut scheduler = Scheduler::new();

        let fade = graph.add_node(Node::new(
            NodeKind::Fade {
                speed: 30.0,
                min: 0.0,
                max: 1.0,
            },
            0.0,
        ));
        let opacity = graph.add_node(Node::new(NodeKind::TargetOpacity, 0.0).with_target(cube));
        {
            let mut cx = scheduler.context(&mut scene);
            graph.connect(&mut cx, fade, "Opacity", opacity, "Opacity").unwrap();
        }

        for _ in 0..40 {
            scheduler.step(&mut graph, &mut scene);
        }
        let before = scene.get(cube).unwrap().opacity;

        let mut cx = scheduler.context(&mut scene);
        graph
            .set_param(&mut cx, fade, "speed", ParamValue::Number(180.0))
            .unwrap();
        let after = scene.get(cube).unwrap().opacity;
        assert!((before - after).abs() < 1e-5);
    }
}
