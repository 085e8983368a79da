/// Scene - the geometry drawn through every camera.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys. Objects share
/// meshes through `Arc` and carry their own world transform.

use std::sync::Arc;
use slotmap::{new_key_type, SlotMap};
use glam::Mat4;
use crate::renderer::Drawable;
use super::mesh::Mesh;

new_key_type! {
    /// Stable key of a scene object
    pub struct SceneObjectKey;
}

/// One placed mesh
#[derive(Debug, Clone)]
pub struct SceneObject {
    mesh: Arc<Mesh>,
    transform: Mat4,
    visible: bool,
}

impl SceneObject {
    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// A drawable collection of scene objects.
#[derive(Debug, Clone)]
pub struct Scene {
    label: String,
    objects: SlotMap<SceneObjectKey, SceneObject>,
}

impl Scene {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            objects: SlotMap::with_key(),
        }
    }

    /// Place a mesh in the scene. The key stays valid until the object is removed.
    pub fn add(&mut self, mesh: Arc<Mesh>, transform: Mat4) -> SceneObjectKey {
        self.objects.insert(SceneObject { mesh, transform, visible: true })
    }

    /// Remove an object. Returns false if the key is invalid.
    pub fn remove(&mut self, key: SceneObjectKey) -> bool {
        self.objects.remove(key).is_some()
    }

    pub fn object(&self, key: SceneObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    /// Set the world transform of an object. Returns false if the key is invalid.
    pub fn set_transform(&mut self, key: SceneObjectKey, transform: Mat4) -> bool {
        match self.objects.get_mut(key) {
            Some(object) => {
                object.transform = transform;
                true
            }
            None => false,
        }
    }

    /// Show or hide an object. Returns false if the key is invalid.
    pub fn set_visible(&mut self, key: SceneObjectKey, visible: bool) -> bool {
        match self.objects.get_mut(key) {
            Some(object) => {
                object.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SceneObjectKey, &SceneObject)> {
        self.objects.iter()
    }

    /// Total triangle count of visible objects
    pub fn triangle_count(&self) -> usize {
        self.objects
            .values()
            .filter(|object| object.visible)
            .map(|object| object.mesh.triangle_count())
            .sum()
    }
}

impl Drawable for Scene {
    fn label(&self) -> &str {
        &self.label
    }

    fn visit_meshes(&self, visitor: &mut dyn FnMut(&Mesh, &Mat4)) {
        for object in self.objects.values().filter(|object| object.visible) {
            visitor(&object.mesh, &object.transform);
        }
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
