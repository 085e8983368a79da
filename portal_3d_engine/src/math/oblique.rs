/// Oblique near-plane clipping (Lengyel).
///
/// Replaces the near plane of an OpenGL-convention perspective projection
/// (right-handed, NDC z in [-1, 1]) with an arbitrary camera-space plane, so
/// geometry on the camera side of a portal is clipped by the hardware near
/// plane. The far plane is skewed accordingly; depth precision is still
/// usable for scene content behind the portal.

use glam::{Mat4, Vec4};

/// Below this magnitude a denominator is treated as zero and the oblique
/// derivation is abandoned for the unmodified projection.
pub const OBLIQUE_EPSILON: f32 = 1e-6;

fn sgn(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Derive the oblique projection, or `None` when the input is degenerate.
///
/// `clip_plane` is `(a, b, c, d)` in camera space; points with
/// `dot(plane, p) >= 0` survive. The plane is normalized first, so any
/// non-zero scale is accepted.
///
/// Degenerate inputs:
/// - plane normal of (near) zero length
/// - projection with a (near) zero `m[0]`, `m[5]` or `m[14]`
/// - plane passing through the camera: after normalization `|d|` is the
///   camera's distance to the plane in world units (views are rigid), so a
///   camera within [`OBLIQUE_EPSILON`] units of the portal plane falls back
/// - `|dot(c, q)|` below [`OBLIQUE_EPSILON`]
/// - a result that is not finite
pub fn try_oblique_projection(clip_plane: Vec4, projection: &Mat4) -> Option<Mat4> {
    let normal_length = clip_plane.truncate().length();
    if !normal_length.is_finite() || normal_length < OBLIQUE_EPSILON {
        return None;
    }
    let c = clip_plane / normal_length;
    if c.w.abs() < OBLIQUE_EPSILON {
        return None;
    }

    // Column-major element indices: m[0] = (0,0), m[5] = (1,1),
    // m[8] = col 2 row 0, m[9] = col 2 row 1, m[10] = (2,2), m[14] = col 3 row 2
    let m0 = projection.x_axis.x;
    let m5 = projection.y_axis.y;
    let m8 = projection.z_axis.x;
    let m9 = projection.z_axis.y;
    let m10 = projection.z_axis.z;
    let m14 = projection.w_axis.z;

    if m0.abs() < OBLIQUE_EPSILON || m5.abs() < OBLIQUE_EPSILON || m14.abs() < OBLIQUE_EPSILON {
        return None;
    }

    // Clip-space corner opposite the plane, brought back to camera space
    let q = Vec4::new(
        (sgn(c.x) + m8) / m0,
        (sgn(c.y) + m9) / m5,
        -1.0,
        (1.0 + m10) / m14,
    );

    let denominator = c.dot(q);
    if !denominator.is_finite() || denominator.abs() < OBLIQUE_EPSILON {
        return None;
    }
    let scaled = c * (2.0 / denominator);

    // Replace the third row: (c'.x, c'.y, c'.z + 1, c'.w)
    let mut result = *projection;
    result.x_axis.z = scaled.x;
    result.y_axis.z = scaled.y;
    result.z_axis.z = scaled.z + 1.0;
    result.w_axis.z = scaled.w;

    if result.is_finite() {
        Some(result)
    } else {
        None
    }
}

/// Oblique projection with fallback: a degenerate input returns `projection`
/// unchanged.
pub fn oblique_projection(clip_plane: Vec4, projection: &Mat4) -> Mat4 {
    try_oblique_projection(clip_plane, projection).unwrap_or(*projection)
}

#[cfg(test)]
#[path = "oblique_tests.rs"]
mod tests;
