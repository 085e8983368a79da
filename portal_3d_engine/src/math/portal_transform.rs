/// Portal transforms - carrying a camera through a portal link and
/// deriving the clip plane of a portal surface in camera space.

use glam::{Mat4, Vec4};

/// Half turn about the up (+Y) axis.
///
/// Linked portals face each other, so crossing one reverses the forward
/// direction.
pub const ROTATE_180_Y: Mat4 = Mat4::from_cols(
    Vec4::new(-1.0, 0.0, 0.0, 0.0),
    Vec4::new(0.0, 1.0, 0.0, 0.0),
    Vec4::new(0.0, 0.0, -1.0, 0.0),
    Vec4::new(0.0, 0.0, 0.0, 1.0),
);

/// Carry a camera transform through a portal link.
///
/// Returns `destination * ROTATE_180_Y * source⁻¹ * camera`: the camera pose
/// relative to the source portal, turned half a revolution, re-expressed
/// relative to the destination portal. In row-vector notation this is
/// `C · S⁻¹ · R · D`.
///
/// # Arguments
///
/// * `destination` - World transform of the portal the view emerges from
/// * `source` - World transform of the portal being looked through
/// * `camera` - World transform of the camera (real, or a previous chain level)
pub fn virtual_camera_transform(destination: &Mat4, source: &Mat4, camera: &Mat4) -> Mat4 {
    *destination * ROTATE_180_Y * source.inverse() * *camera
}

/// Plane of a portal surface expressed in camera space.
///
/// The plane passes through the portal origin with normal `-forward` (the
/// portal faces its local +Z), so a camera looking at the portal's front sits
/// on the negative side, and geometry behind the portal is on the positive
/// side. Returned as `(a, b, c, d)` with `a*x + b*y + c*z + d = 0`.
///
/// `view` must be rigid (rotation + translation), which holds for every view
/// matrix produced from a `Pose` or a camera chain.
pub fn portal_clip_plane(portal_world: &Mat4, view: &Mat4) -> Vec4 {
    let forward = portal_world.transform_vector3(glam::Vec3::Z).normalize_or_zero();
    let position = portal_world.w_axis.truncate();

    let normal = view.transform_vector3(-forward);
    let point = view.transform_point3(position);

    normal.extend(-normal.dot(point))
}

#[cfg(test)]
#[path = "portal_transform_tests.rs"]
mod tests;
