// SPDX-License-Identifier: MIT OR Apache-2.0
//! The persistence surface for graph documents.
//!
//! The library stores serialized graphs as opaque blobs keyed by the
//! owning scene id. It has no knowledge of node semantics; encoding
//! and decoding happen in `motive_graph::document`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a scene/document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneId(pub Uuid);

impl SceneId {
    /// Create a new random scene ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SceneId {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque graph blob storage, keyed by scene id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentLibrary {
    blobs: IndexMap<SceneId, String>,
}

impl DocumentLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (or replace) the blob for a scene
    pub fn store(&mut self, scene: SceneId, blob: String) {
        self.blobs.insert(scene, blob);
    }

    /// Load the blob for a scene
    pub fn load(&self, scene: SceneId) -> Option<&str> {
        self.blobs.get(&scene).map(String::as_str)
    }

    /// Drop the blob for a scene
    pub fn remove(&mut self, scene: SceneId) -> Option<String> {
        self.blobs.shift_remove(&scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_replaces_blobs() {
        let mut library = DocumentLibrary::new();
        let scene = SceneId::new();

        library.store(scene, "{\"nodes\":[]}".to_string());
        assert_eq!(library.load(scene), Some("{\"nodes\":[]}"));

        library.store(scene, "{}".to_string());
        assert_eq!(library.load(scene), Some("{}"));

        assert!(library.remove(scene).is_some());
        assert_eq!(library.load(scene), None);
    }
}
