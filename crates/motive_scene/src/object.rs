// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene objects: the concrete targets binding nodes drive.

use motive_graph::{TargetId, TargetObject};
use serde::{Deserialize, Serialize};

/// Transform component data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    /// Position (x, y, z)
    pub position: [f32; 3],
    /// Rotation in euler components
    pub rotation: [f32; 3],
    /// Scale
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }
}

/// An object in the scene, addressable by stable id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    /// Stable identity, referenced by graph binding nodes
    pub id: TargetId,
    /// Object name
    pub name: String,
    /// Transform component
    pub transform: Transform,
    /// Whether the object is rendered
    pub visible: bool,
    /// Render opacity in [0, 1]
    pub opacity: f32,
    /// Set whenever the graph (or anything else) mutates the object;
    /// cleared by the renderer after it consumed the change
    #[serde(skip)]
    pub dirty: bool,
}

impl SceneObject {
    /// Create a new object with default transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TargetId::new(),
            name: name.into(),
            transform: Transform::default(),
            visible: true,
            opacity: 1.0,
            dirty: false,
        }
    }

    /// Consume the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl TargetObject for SceneObject {
    fn position(&self) -> [f32; 3] {
        self.transform.position
    }

    fn set_position(&mut self, position: [f32; 3]) {
        self.transform.position = position;
    }

    fn rotation(&self) -> [f32; 3] {
        self.transform.rotation
    }

    fn set_rotation(&mut self, rotation: [f32; 3]) {
        self.transform.rotation = rotation;
    }

    fn scale(&self) -> [f32; 3] {
        self.transform.scale
    }

    fn set_scale(&mut self, scale: [f32; 3]) {
        self.transform.scale = scale;
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
