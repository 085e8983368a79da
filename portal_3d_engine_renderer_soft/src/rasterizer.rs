/// Rasterizer - triangle setup, clipping and per-fragment tests
///
/// Triangles are clipped in homogeneous clip space against all six frustum
/// planes, so an oblique near plane clips geometry exactly as the
/// projection describes. Screen positions are snapped to fixed point and
/// covered with integer edge functions: two triangles sharing an edge
/// never both cover a sample on it, which matters for stencil increments.
///
/// Fragment order follows OpenGL: stencil test, depth test, stencil update,
/// depth write, color write.

use glam::{Mat4, Vec4};
use portal_3d_engine::portal3d::camera::RenderCamera;
use portal_3d_engine::portal3d::render::{CullMode, RenderState};
use portal_3d_engine::portal3d::scene::Mesh;
use crate::framebuffer::{to_rgba8, write_color, Framebuffer, STENCIL_MAX};
use crate::stats::RendererStats;

const SUBPIXEL_BITS: u32 = 8;
const SUBPIXEL_SCALE: f32 = (1 << SUBPIXEL_BITS) as f32;
const SUBPIXEL_HALF: i64 = 1 << (SUBPIXEL_BITS - 1);

/// Minimum clip-space w kept after clipping
const W_EPSILON: f32 = 1e-6;

/// Clip planes as `dot(plane, v) >= 0`
const CLIP_PLANES: [Vec4; 6] = [
    Vec4::new(0.0, 0.0, 1.0, 1.0),  // near
    Vec4::new(0.0, 0.0, -1.0, 1.0), // far
    Vec4::new(1.0, 0.0, 0.0, 1.0),  // left
    Vec4::new(-1.0, 0.0, 0.0, 1.0), // right
    Vec4::new(0.0, 1.0, 0.0, 1.0),  // bottom
    Vec4::new(0.0, -1.0, 0.0, 1.0), // top
];

#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: i64,
    y: i64,
    depth: f32,
}

/// Rasterize one mesh with the given state.
pub(crate) fn draw_mesh(
    fb: &mut Framebuffer,
    state: &RenderState,
    mesh: &Mesh,
    model: &Mat4,
    camera: &RenderCamera,
    stats: &mut RendererStats,
) {
    if !camera.frustum().intersects_aabb(&mesh.bounds().transformed(model)) {
        stats.meshes_culled += 1;
        return;
    }

    let mvp = camera.view_projection_matrix() * *model;
    let color = to_rgba8(mesh.color());

    for index in 0..mesh.triangle_count() {
        stats.triangles_submitted += 1;
        let [a, b, c] = mesh.triangle(index);
        let polygon = clip_polygon(vec![
            mvp * a.extend(1.0),
            mvp * b.extend(1.0),
            mvp * c.extend(1.0),
        ]);
        if polygon.len() < 3 {
            continue;
        }

        let Some(screen) = polygon
            .iter()
            .map(|v| to_screen(*v, fb.width(), fb.height()))
            .collect::<Option<Vec<_>>>()
        else {
            continue;
        };

        let mut rasterized = false;
        for i in 1..screen.len() - 1 {
            rasterized |= rasterize_triangle(fb, state, color, [screen[0], screen[i], screen[i + 1]], stats);
        }
        if rasterized {
            stats.triangles_rasterized += 1;
        }
    }
}

// ===== CLIPPING =====

/// Sutherland-Hodgman against every clip plane, then `w > 0`.
fn clip_polygon(mut polygon: Vec<Vec4>) -> Vec<Vec4> {
    for plane in CLIP_PLANES {
        polygon = clip_against(&polygon, |v| plane.dot(v));
        if polygon.len() < 3 {
            return polygon;
        }
    }
    clip_against(&polygon, |v| v.w - W_EPSILON)
}

fn clip_against(polygon: &[Vec4], distance: impl Fn(Vec4) -> f32) -> Vec<Vec4> {
    let mut output = Vec::with_capacity(polygon.len() + 2);
    for (i, &current) in polygon.iter().enumerate() {
        let next = polygon[(i + 1) % polygon.len()];
        let (dc, dn) = (distance(current), distance(next));

        if dc >= 0.0 {
            output.push(current);
        }
        if (dc >= 0.0) != (dn >= 0.0) {
            output.push(intersect(current, next, dc, dn));
        }
    }
    output
}

/// Edge/plane intersection, computed from the same endpoint whichever way
/// the edge is walked so neighbouring triangles agree bit for bit.
fn intersect(a: Vec4, b: Vec4, da: f32, db: f32) -> Vec4 {
    let (a, b, da, db) = if precedes(a, b) { (a, b, da, db) } else { (b, a, db, da) };
    let t = da / (da - db);
    a + (b - a) * t
}

fn precedes(a: Vec4, b: Vec4) -> bool {
    let (a, b) = (a.to_array(), b.to_array());
    for i in 0..4 {
        if a[i] != b[i] {
            return a[i] < b[i];
        }
    }
    true
}

/// Clip space to fixed-point window coordinates (row 0 at the top) and
/// window depth in [0, 1].
fn to_screen(clip: Vec4, width: u32, height: u32) -> Option<ScreenVertex> {
    let ndc = clip.truncate() / clip.w;
    if !ndc.is_finite() {
        return None;
    }
    let x = (ndc.x * 0.5 + 0.5) * width as f32;
    let y = (0.5 - ndc.y * 0.5) * height as f32;
    Some(ScreenVertex {
        x: (x * SUBPIXEL_SCALE).round() as i64,
        y: (y * SUBPIXEL_SCALE).round() as i64,
        depth: (ndc.z * 0.5 + 0.5).clamp(0.0, 1.0),
    })
}

// ===== TRIANGLE SETUP =====

#[inline]
fn edge(a: &ScreenVertex, b: &ScreenVertex, px: i64, py: i64) -> i64 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

/// Whether samples exactly on edge `a -> b` belong to this triangle.
/// Opposite directions never both own an edge.
#[inline]
fn owns_edge(a: &ScreenVertex, b: &ScreenVertex) -> bool {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    dy > 0 || (dy == 0 && dx < 0)
}

#[inline]
fn covers(weight: i64, owner: bool) -> bool {
    weight > 0 || (weight == 0 && owner)
}

/// Returns false when the triangle was culled or degenerate.
fn rasterize_triangle(
    fb: &mut Framebuffer,
    state: &RenderState,
    color: [u8; 4],
    vertices: [ScreenVertex; 3],
    stats: &mut RendererStats,
) -> bool {
    let [v0, mut v1, mut v2] = vertices;
    let mut area = edge(&v0, &v1, v2.x, v2.y);
    if area == 0 {
        return false;
    }

    // Counter-clockwise in NDC is clockwise with y pointing down
    let front_facing = area < 0;
    if state.cull_face {
        let culled = match state.cull_mode {
            CullMode::Back => !front_facing,
            CullMode::Front => front_facing,
            CullMode::FrontAndBack => true,
        };
        if culled {
            return false;
        }
    }

    if area < 0 {
        std::mem::swap(&mut v1, &mut v2);
        area = -area;
    }

    let width = fb.width() as i64;
    let height = fb.height() as i64;
    let min_x = v0.x.min(v1.x).min(v2.x);
    let max_x = v0.x.max(v1.x).max(v2.x);
    let min_y = v0.y.min(v1.y).min(v2.y);
    let max_y = v0.y.max(v1.y).max(v2.y);

    let x0 = (min_x >> SUBPIXEL_BITS).max(0);
    let x1 = (max_x >> SUBPIXEL_BITS).min(width - 1);
    let y0 = (min_y >> SUBPIXEL_BITS).max(0);
    let y1 = (max_y >> SUBPIXEL_BITS).min(height - 1);

    let owners = [owns_edge(&v1, &v2), owns_edge(&v2, &v0), owns_edge(&v0, &v1)];
    let inv_area = 1.0 / area as f64;

    for py in y0..=y1 {
        let sy = (py << SUBPIXEL_BITS) + SUBPIXEL_HALF;
        for px in x0..=x1 {
            let sx = (px << SUBPIXEL_BITS) + SUBPIXEL_HALF;

            let w0 = edge(&v1, &v2, sx, sy);
            let w1 = edge(&v2, &v0, sx, sy);
            let w2 = edge(&v0, &v1, sx, sy);
            if !(covers(w0, owners[0]) && covers(w1, owners[1]) && covers(w2, owners[2])) {
                continue;
            }

            let depth = ((w0 as f64 * v0.depth as f64
                + w1 as f64 * v1.depth as f64
                + w2 as f64 * v2.depth as f64)
                * inv_area) as f32;

            let index = fb.index(px as u32, py as u32);
            shade_fragment(fb, state, index, depth.clamp(0.0, 1.0), color, stats);
        }
    }
    true
}

// ===== FRAGMENT =====

fn shade_fragment(
    fb: &mut Framebuffer,
    state: &RenderState,
    index: usize,
    depth: f32,
    color: [u8; 4],
    stats: &mut RendererStats,
) {
    stats.fragments_tested += 1;

    let stored_stencil = fb.stencil_values()[index] as u32;
    if !state.stencil_passes(stored_stencil) {
        fb.stencil_mut()[index] = state.stencil_after(stored_stencil, false, false, STENCIL_MAX) as u8;
        return;
    }

    let depth_pass = state.depth_passes(depth, fb.depth_values()[index]);
    fb.stencil_mut()[index] = state.stencil_after(stored_stencil, true, depth_pass, STENCIL_MAX) as u8;
    if !depth_pass {
        return;
    }

    stats.fragments_passed += 1;
    if state.depth_test && state.depth_write {
        fb.depth_mut()[index] = depth;
    }
    if state.color_mask.any() {
        write_color(&mut fb.color_mut()[index], color, state.color_mask);
    }
}

#[cfg(test)]
#[path = "rasterizer_tests.rs"]
mod tests;
