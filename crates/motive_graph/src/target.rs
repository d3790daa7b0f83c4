// SPDX-License-Identifier: MIT OR Apache-2.0
//! Contracts for the externally-owned target objects that binding
//! nodes drive.
//!
//! The graph never owns a target. Binding nodes hold only a stable
//! [`TargetId`] and go through a [`TargetStore`] on every compute; an
//! id that no longer resolves simply makes the node inert.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a target object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub Uuid);

impl TargetId {
    /// Create a new random target ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TargetId {
    fn default() -> Self {
        Self::new()
    }
}

/// A live object whose properties the graph may read and write
pub trait TargetObject {
    /// Current position
    fn position(&self) -> [f32; 3];
    /// Set position
    fn set_position(&mut self, position: [f32; 3]);
    /// Current rotation (euler components)
    fn rotation(&self) -> [f32; 3];
    /// Set rotation
    fn set_rotation(&mut self, rotation: [f32; 3]);
    /// Current scale
    fn scale(&self) -> [f32; 3];
    /// Set scale
    fn set_scale(&mut self, scale: [f32; 3]);
    /// Current visibility
    fn visible(&self) -> bool;
    /// Set visibility
    fn set_visible(&mut self, visible: bool);
    /// Current opacity
    fn opacity(&self) -> f32;
    /// Set opacity
    fn set_opacity(&mut self, opacity: f32);
    /// Notify the owner that the object's transform changed
    fn mark_dirty(&mut self);
}

/// Resolves stable ids to live target objects
pub trait TargetStore {
    /// Look up a target; `None` when the object was destroyed or never
    /// existed
    fn resolve(&mut self, id: TargetId) -> Option<&mut dyn TargetObject>;
}

/// A store with no targets; every lookup misses.
///
/// Useful for evaluating graphs that contain no binding nodes, and in
/// tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTargets;

impl TargetStore for NoTargets {
    fn resolve(&mut self, _id: TargetId) -> Option<&mut dyn TargetObject> {
        None
    }
}
