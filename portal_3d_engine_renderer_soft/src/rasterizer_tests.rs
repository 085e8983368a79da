use glam::{Mat4, Vec3};
use portal_3d_engine::portal3d::camera::RenderCamera;
use portal_3d_engine::portal3d::render::{ColorWriteMask, CompareOp, CullMode, RenderState, StencilOp};
use portal_3d_engine::portal3d::scene::{rgb8, Mesh};
use crate::framebuffer::Framebuffer;
use crate::stats::RendererStats;
use super::*;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Clip space equals world space: NDC x/y in [-1, 1] span the viewport.
fn identity_camera() -> RenderCamera {
    RenderCamera::new(Mat4::IDENTITY, Mat4::IDENTITY)
}

fn counting_state() -> RenderState {
    let mut state = RenderState { stencil_test: true, ..RenderState::default() };
    state.stencil.func = CompareOp::Always;
    state.stencil.pass_op = StencilOp::IncrementAndClamp;
    state
}

fn draw(fb: &mut Framebuffer, state: &RenderState, mesh: &Mesh, model: Mat4) -> RendererStats {
    let mut stats = RendererStats::default();
    draw_mesh(fb, state, mesh, &model, &identity_camera(), &mut stats);
    stats
}

// ============================================================================
// Coverage
// ============================================================================

#[test]
fn test_full_screen_quad_covers_each_pixel_once() {
    let mut fb = Framebuffer::new(8, 8).unwrap();
    let quad = Mesh::quad(2.0, 2.0, rgb8(0, 255, 0));

    let stats = draw(&mut fb, &counting_state(), &quad, Mat4::IDENTITY);

    // The diagonal runs through pixel centers; it must not be covered twice
    assert!(fb.stencil_values().iter().all(|&s| s == 1));
    assert_eq!(stats.fragments_tested, 64);
    assert_eq!(stats.triangles_rasterized, 2);
    assert_eq!(fb.color_at(3, 4), [0, 255, 0, 255]);
}

#[test]
fn test_adjacent_quads_share_edges_exactly() {
    let mut fb = Framebuffer::new(7, 5).unwrap();
    let half = Mesh::quad(1.0, 2.0, rgb8(255, 255, 255));
    let state = counting_state();

    draw(&mut fb, &state, &half, Mat4::from_translation(Vec3::new(-0.5, 0.0, 0.0)));
    draw(&mut fb, &state, &half, Mat4::from_translation(Vec3::new(0.5, 0.0, 0.0)));

    assert!(fb.stencil_values().iter().all(|&s| s == 1));
}

#[test]
fn test_partial_quad_coverage() {
    let mut fb = Framebuffer::new(4, 4).unwrap();
    let quad = Mesh::quad(1.0, 1.0, rgb8(255, 0, 0));
    draw(&mut fb, &counting_state(), &quad, Mat4::IDENTITY);

    // NDC [-0.5, 0.5] is pixels 1..=2 on both axes
    for y in 0..4 {
        for x in 0..4 {
            let inside = (1..=2).contains(&x) && (1..=2).contains(&y);
            assert_eq!(fb.stencil_at(x, y), inside as u8, "pixel ({}, {})", x, y);
        }
    }
}

// ============================================================================
// Culling and clipping
// ============================================================================

#[test]
fn test_back_faces_are_culled() {
    let mut fb = Framebuffer::new(4, 4).unwrap();
    let quad = Mesh::quad(2.0, 2.0, rgb8(255, 0, 0));
    let flipped = Mat4::from_rotation_y(std::f32::consts::PI);

    let mut state = counting_state();
    state.cull_face = true;
    let stats = draw(&mut fb, &state, &quad, flipped);
    assert_eq!(stats.triangles_rasterized, 0);
    assert!(fb.stencil_values().iter().all(|&s| s == 0));

    state.cull_mode = CullMode::Front;
    draw(&mut fb, &state, &quad, flipped);
    assert!(fb.stencil_values().iter().all(|&s| s == 1));

    state.cull_mode = CullMode::FrontAndBack;
    draw(&mut fb, &state, &quad, Mat4::IDENTITY);
    assert!(fb.stencil_values().iter().all(|&s| s == 1));
}

#[test]
fn test_mesh_outside_frustum_is_rejected() {
    let mut fb = Framebuffer::new(4, 4).unwrap();
    let quad = Mesh::quad(2.0, 2.0, rgb8(255, 0, 0));
    let stats = draw(&mut fb, &counting_state(), &quad, Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0)));

    assert_eq!(stats.meshes_culled, 1);
    assert_eq!(stats.triangles_submitted, 0);
}

#[test]
fn test_triangle_crossing_near_plane_is_clipped() {
    let mut fb = Framebuffer::new(8, 8).unwrap();
    // Tilted so the left edge sits in front of the near plane (z < -1)
    let tilt = Mat4::from_rotation_y(-1.2);
    let quad = Mesh::quad(4.0, 2.0, rgb8(255, 0, 0));
    let stats = draw(&mut fb, &counting_state(), &quad, tilt);

    let covered = fb.stencil_values().iter().filter(|&&s| s == 1).count();
    assert!(covered > 0 && covered < 64, "covered {}", covered);
    assert_eq!(stats.meshes_culled, 0);
    assert!(fb.stencil_values().iter().all(|&s| s <= 1));
}

// ============================================================================
// Fragment tests
// ============================================================================

#[test]
fn test_depth_test_keeps_nearest() {
    let mut fb = Framebuffer::new(4, 4).unwrap();
    let near = Mesh::quad(2.0, 2.0, rgb8(255, 0, 0));
    let far = Mesh::quad(2.0, 2.0, rgb8(0, 255, 0));
    let state = RenderState { depth_test: true, ..RenderState::default() };

    draw(&mut fb, &state, &near, Mat4::from_translation(Vec3::new(0.0, 0.0, -0.5)));
    let stats = draw(&mut fb, &state, &far, Mat4::from_translation(Vec3::new(0.0, 0.0, 0.5)));

    assert_eq!(fb.color_at(2, 2), [255, 0, 0, 255]);
    assert!((fb.depth_at(2, 2) - 0.25).abs() < 1e-6);
    assert_eq!(stats.fragments_passed, 0);
    assert_eq!(stats.fragments_tested, 16);
}

#[test]
fn test_depth_not_written_without_depth_test() {
    let mut fb = Framebuffer::new(2, 2).unwrap();
    let quad = Mesh::quad(2.0, 2.0, rgb8(255, 0, 0));
    draw(&mut fb, &RenderState::default(), &quad, Mat4::from_translation(Vec3::new(0.0, 0.0, -0.5)));

    assert_eq!(fb.color_at(0, 0), [255, 0, 0, 255]);
    assert_eq!(fb.depth_at(0, 0), 1.0);
}

#[test]
fn test_stencil_fail_and_depth_fail_ops() {
    let mut fb = Framebuffer::new(2, 2).unwrap();
    let quad = Mesh::quad(2.0, 2.0, rgb8(255, 0, 0));

    let mut state = RenderState { stencil_test: true, depth_test: true, ..RenderState::default() };
    state.stencil.func = CompareOp::Equal;
    state.stencil.reference = 1;
    state.stencil.fail_op = StencilOp::Replace;
    state.color_mask = ColorWriteMask::NONE;

    // Stored 0 != 1: fail op replaces with the reference
    draw(&mut fb, &state, &quad, Mat4::IDENTITY);
    assert!(fb.stencil_values().iter().all(|&s| s == 1));
    assert_eq!(fb.color_at(0, 0), [0, 0, 0, 0]);

    // Now the stencil passes but depth fails (0.5 < 0.5 is false)
    state.stencil.depth_fail_op = StencilOp::Invert;
    fb.depth_mut().fill(0.5);
    draw(&mut fb, &state, &quad, Mat4::IDENTITY);
    assert!(fb.stencil_values().iter().all(|&s| s == 0xFE));
}

#[test]
fn test_stencil_write_mask_limits_updates() {
    let mut fb = Framebuffer::new(2, 2).unwrap();
    let quad = Mesh::quad(2.0, 2.0, rgb8(255, 0, 0));

    let mut state = counting_state();
    state.stencil.write_mask = 0;
    draw(&mut fb, &state, &quad, Mat4::IDENTITY);
    assert!(fb.stencil_values().iter().all(|&s| s == 0));
}

#[test]
fn test_increment_clamps_at_stencil_max() {
    let mut fb = Framebuffer::new(1, 1).unwrap();
    fb.stencil_mut()[0] = 0xFF;
    let quad = Mesh::quad(2.0, 2.0, rgb8(255, 0, 0));
    draw(&mut fb, &counting_state(), &quad, Mat4::IDENTITY);
    assert_eq!(fb.stencil_at(0, 0), 0xFF);
}

#[test]
fn test_color_mask_channels() {
    let mut fb = Framebuffer::new(1, 1).unwrap();
    let quad = Mesh::quad(2.0, 2.0, [1.0, 1.0, 1.0, 1.0]);
    let state = RenderState {
        color_mask: ColorWriteMask { r: false, g: true, b: false, a: true },
        ..RenderState::default()
    };
    draw(&mut fb, &state, &quad, Mat4::IDENTITY);
    assert_eq!(fb.color_at(0, 0), [0, 255, 0, 255]);
}
