//! Camera module - the driven perspective camera and the per-draw camera.
//!
//! `PerspectiveCamera` is the primary camera, owned by the caller and moved
//! by input. `RenderCamera` is the ephemeral `(view, projection)` pair a
//! draw call is issued with: the real camera, or one level of a portal
//! camera chain.

mod camera;
mod frustum;
mod render_camera;

pub use camera::PerspectiveCamera;
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use render_camera::RenderCamera;
