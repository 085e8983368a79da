/// Frustum - six clipping planes for whole-mesh rejection.
///
/// Each plane is a Vec4 (A, B, C, D) with an inward-pointing unit normal:
/// a point P is inside when `dot(plane, (P, 1)) >= 0` for all six planes.
///
/// Extracted from a render camera's view-projection. When the projection
/// is oblique, the near plane is the portal plane, so meshes entirely on
/// the camera side of a portal are rejected before rasterization.

use glam::{Mat4, Vec3, Vec4};
use crate::scene::AABB;

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six frustum planes: left, right, bottom, top, near, far.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract the planes from a view-projection matrix (Gribb & Hartmann,
    /// OpenGL clip volume `-w <= x, y, z <= w`).
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let (r0, r1, r2, r3) = (vp.row(0), vp.row(1), vp.row(2), vp.row(3));

        let mut planes = [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r3 + r2, r3 - r2];
        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Signed distance of `point` to plane `index` (positive = inside).
    pub fn distance(&self, index: usize, point: Vec3) -> f32 {
        self.planes[index].dot(point.extend(1.0))
    }

    /// Whether `point` is inside all six planes.
    pub fn contains_point(&self, point: Vec3) -> bool {
        (0..6).all(|index| self.distance(index, point) >= 0.0)
    }

    /// Conservative AABB test: `false` only when the box is entirely
    /// outside one plane.
    ///
    /// For each plane the "positive vertex" (the corner furthest along the
    /// normal) is tested; if even that corner is outside, so is the box.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.planes.iter().all(|plane| {
            let p_vertex = Vec3::select(plane.truncate().cmpge(Vec3::ZERO), aabb.max, aabb.min);
            plane.dot(p_vertex.extend(1.0)) >= 0.0
        })
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
