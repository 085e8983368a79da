/// PerspectiveCamera - the primary camera of a frame.
///
/// Holds the projection parameters and a `Pose`. The projection follows the
/// OpenGL clip conventions (right-handed, NDC z in [-1, 1]) because the
/// oblique near-plane derivation is written against them.
///
/// The engine does NOT drive the camera. The caller (controls, demo,
/// tests) mutates the pose between frames.

use glam::Mat4;
use crate::math::Pose;
use super::render_camera::RenderCamera;

/// Perspective camera: vertical field of view in degrees, aspect ratio,
/// near/far distances and a world pose.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    fov_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
    pose: Pose,
}

impl PerspectiveCamera {
    /// Create a camera at the origin looking down -Z.
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_degrees,
            aspect,
            near,
            far,
            pose: Pose::IDENTITY,
        }
    }

    /// Builder-style pose assignment.
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    // ===== GETTERS =====

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Mutable pose, for controls that integrate movement in place.
    pub fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    // ===== DERIVED MATRICES =====

    /// World transform of the camera.
    pub fn world_transform(&self) -> Mat4 {
        self.pose.matrix()
    }

    /// View matrix (inverse of the world transform).
    pub fn view_matrix(&self) -> Mat4 {
        self.pose.inverse_matrix()
    }

    /// OpenGL-convention perspective projection.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// The `(view, projection)` pair draws through the real camera use.
    pub fn render_camera(&self) -> RenderCamera {
        RenderCamera::new(self.view_matrix(), self.projection_matrix())
    }

    // ===== SETTERS =====

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Update the aspect ratio (after a resize).
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov_degrees = fov_degrees;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
