/// Pose - rigid placement of an entity in world space.
///
/// Position plus orientation, no scale. Portals and cameras own one each;
/// input and animation mutate them between frames.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position + orientation (unit quaternion). Converts to an affine world transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    /// Pose at the origin with no rotation.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_translation(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Build a pose from Euler angles in radians, applied in XYZ order
    /// (`Rx * Ry * Rz`).
    pub fn from_euler_xyz(position: Vec3, x: f32, y: f32, z: f32) -> Self {
        Self::new(position, Quat::from_euler(EulerRot::XYZ, x, y, z))
    }

    /// Extract a pose from an affine matrix. Any scale in the matrix is dropped.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let (_scale, rotation, position) = matrix.to_scale_rotation_translation();
        Self::new(position, rotation.normalize())
    }

    /// World transform (`translation * rotation`).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Inverse of the world transform, computed without a general 4x4 inverse.
    pub fn inverse_matrix(&self) -> Mat4 {
        let inv_rotation = self.rotation.inverse();
        Mat4::from_rotation_translation(inv_rotation, inv_rotation * -self.position)
    }

    /// World-space direction of the local +Z axis.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// World-space direction of the local +Y axis.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
#[path = "pose_tests.rs"]
mod tests;
