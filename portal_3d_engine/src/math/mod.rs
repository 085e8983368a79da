//! Math module - poses and the portal projection derivations.
//!
//! Convention: glam column-major matrices with column vectors. A product
//! applies right to left, so `a * b` transforms by `b` first, then `a`.

mod pose;
mod portal_transform;
mod oblique;

pub use pose::Pose;
pub use portal_transform::{ROTATE_180_Y, virtual_camera_transform, portal_clip_plane};
pub use oblique::{OBLIQUE_EPSILON, oblique_projection, try_oblique_projection};
