// SPDX-License-Identifier: MIT OR Apache-2.0
//! The scene: an owning table of objects, resolvable by stable id.
//!
//! The scene is the single authoritative owner of its objects; graph
//! nodes only ever hold a [`TargetId`] and look objects up per
//! compute, so destroying an object here can never dangle a reference
//! inside a graph.

use crate::object::SceneObject;
use indexmap::IndexMap;
use motive_graph::{TargetId, TargetObject, TargetStore};
use serde::{Deserialize, Serialize};

/// Scene data containing all objects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    /// All objects in the scene
    objects: IndexMap<TargetId, SceneObject>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, returning its stable id
    pub fn spawn(&mut self, object: SceneObject) -> TargetId {
        let id = object.id;
        self.objects.insert(id, object);
        id
    }

    /// Get an object by ID
    pub fn get(&self, id: TargetId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Get a mutable reference to an object by ID
    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// Destroy an object. Any graph nodes still bound to the id fall
    /// back to inert no-ops on their next compute.
    pub fn remove(&mut self, id: TargetId) -> Option<SceneObject> {
        let removed = self.objects.shift_remove(&id);
        if let Some(object) = &removed {
            tracing::debug!(?id, name = %object.name, "scene object destroyed");
        }
        removed
    }

    /// Iterate all objects
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    /// Number of objects in the scene
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl TargetStore for Scene {
    fn resolve(&mut self, id: TargetId) -> Option<&mut dyn TargetObject> {
        self.objects.get_mut(&id).map(|o| o as &mut dyn TargetObject)
    }
}
