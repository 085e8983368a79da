//! Scene module
//!
//! Flat-colored triangle meshes and the scene that places them. Both the
//! scene and portal surfaces are drawn through the `Drawable` trait.

mod mesh;
mod scene;

pub use mesh::{Color, Mesh, AABB, rgb8};
pub use scene::{Scene, SceneObject, SceneObjectKey};
