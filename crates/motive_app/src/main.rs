// SPDX-License-Identifier: MIT OR Apache-2.0
//! Motive headless driver.
//!
//! Builds a small demo: a cube animated by a Spin and a Fade node,
//! runs the scheduler over simulated frames, and saves/reloads the
//! graph through the document library to show the round trip.

use motive_graph::{Graph, GraphDocument, Node, NodeKind, Scheduler};
use motive_scene::{DocumentLibrary, Scene, SceneId, SceneObject};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("motive_app=info".parse().expect("static directive"))
        .add_directive("motive_graph=info".parse().expect("static directive"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut scene = Scene::new();
    let cube = scene.spawn(SceneObject::new("Cube"));

    let mut graph = Graph::new("demo");
    let mut scheduler = Scheduler::new();

    let spin = graph.add_node(
        Node::new(
            NodeKind::Spin {
                speed: 60.0,
                clockwise: true,
            },
            scheduler.now(),
        )
        .with_position(0.0, 0.0),
    );
    let fade = graph.add_node(
        Node::new(
            NodeKind::Fade {
                speed: 30.0,
                min: 0.2,
                max: 1.0,
            },
            scheduler.now(),
        )
        .with_position(0.0, 120.0),
    );
    let rotation = graph.add_node(
        Node::new(NodeKind::TargetRotation, scheduler.now())
            .with_target(cube)
            .with_position(260.0, 0.0),
    );
    let opacity = graph.add_node(
        Node::new(NodeKind::TargetOpacity, scheduler.now())
            .with_target(cube)
            .with_position(260.0, 120.0),
    );

    {
        let mut cx = scheduler.context(&mut scene);
        graph
            .connect(&mut cx, spin, "Rotation", rotation, "Z")
            .expect("spin output is numeric");
        graph
            .connect(&mut cx, fade, "Opacity", opacity, "Opacity")
            .expect("fade output is numeric");
    }

    // Two simulated seconds at the nominal frame rate.
    for frame in 0..120 {
        scheduler.step(&mut graph, &mut scene);
        if frame % 30 == 29 {
            let object = scene.get(cube).expect("cube owned by the scene");
            tracing::info!(
                seconds = scheduler.now(),
                rotation_z = f64::from(object.transform.rotation[2]),
                opacity = f64::from(object.opacity),
                "cube state"
            );
        }
    }

    // Round-trip the graph through the persistence surface.
    let mut library = DocumentLibrary::new();
    let scene_id = SceneId::new();
    match GraphDocument::capture(&graph).to_json() {
        Ok(blob) => library.store(scene_id, blob),
        Err(err) => {
            tracing::error!(%err, "failed to encode graph document");
            return;
        }
    }

    let blob = library.load(scene_id).expect("blob stored above");
    match GraphDocument::from_json(blob) {
        Ok(doc) => {
            let mut cx = scheduler.context(&mut scene);
            let restored = doc.restore(&mut cx);
            tracing::info!(
                nodes = restored.node_count(),
                connections = restored.connection_count(),
                "graph restored from document"
            );
        }
        Err(err) => tracing::error!(%err, "failed to decode graph document"),
    }
}
