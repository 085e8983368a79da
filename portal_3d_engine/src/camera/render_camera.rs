/// RenderCamera - the camera a single draw call is issued with.
///
/// Ephemeral: built per frame from the real camera or from a portal chain
/// entry. No pose, no input, just the two matrices.

use glam::Mat4;
use super::frustum::Frustum;

/// View + projection pair handed to `CommandList::draw`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCamera {
    view: Mat4,
    projection: Mat4,
}

impl RenderCamera {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self { view, projection }
    }

    /// View matrix (world → camera).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    /// Projection matrix, possibly oblique.
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Culling volume of this camera. With an oblique projection the near
    /// plane is the portal plane.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection_matrix())
    }
}
