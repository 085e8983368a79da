use glam::{Mat4, Quat, Vec3, Vec4};
use std::f32::consts::PI;
use super::*;
use crate::math::Pose;

fn approx_mat(a: &Mat4, b: &Mat4) -> bool {
    a.abs_diff_eq(*b, 1e-4)
}

// ============================================================================
// ROTATE_180_Y
// ============================================================================

#[test]
fn test_rotate_180_y_matches_rotation() {
    assert!(approx_mat(&ROTATE_180_Y, &Mat4::from_rotation_y(PI)));
}

#[test]
fn test_rotate_180_y_is_involution() {
    assert_eq!(ROTATE_180_Y * ROTATE_180_Y, Mat4::IDENTITY);
}

// ============================================================================
// virtual_camera_transform
// ============================================================================

#[test]
fn test_identity_portals_only_apply_half_turn() {
    let camera = Pose::new(Vec3::new(1.0, 2.0, 5.0), Quat::from_rotation_x(0.2)).matrix();
    let result = virtual_camera_transform(&Mat4::IDENTITY, &Mat4::IDENTITY, &camera);
    assert!(approx_mat(&result, &(ROTATE_180_Y * camera)));
}

#[test]
fn test_coincident_portals_conjugate_half_turn() {
    let portal = Pose::new(Vec3::new(-5.0, 7.0, -3.0), Quat::from_rotation_y(PI * 0.5)).matrix();
    let camera = Pose::from_translation(Vec3::new(0.0, 1.0, 0.0)).matrix();
    let result = virtual_camera_transform(&portal, &portal, &camera);
    let expected = portal * ROTATE_180_Y * portal.inverse() * camera;
    assert!(approx_mat(&result, &expected));
}

#[test]
fn test_camera_in_front_of_source_lands_behind_destination() {
    // Source faces +Z at the origin, destination faces +Z at x = 10
    let source = Mat4::IDENTITY;
    let destination = Pose::from_translation(Vec3::new(10.0, 0.0, 0.0)).matrix();
    let camera = Pose::from_translation(Vec3::new(0.0, 0.0, 3.0)).matrix();

    let result = virtual_camera_transform(&destination, &source, &camera);
    let position = result.w_axis.truncate();
    assert!(position.abs_diff_eq(Vec3::new(10.0, 0.0, -3.0), 1e-5));

    // Camera looked toward -Z (into the source); the virtual one looks toward +Z
    let look = result.transform_vector3(-Vec3::Z);
    assert!(look.abs_diff_eq(Vec3::Z, 1e-5));
}

#[test]
fn test_facing_portals_shift_by_constant_delta() {
    // Source faces +Z at the origin, destination faces -Z two units ahead
    let source = Mat4::IDENTITY;
    let destination = Pose::new(Vec3::new(0.0, 0.0, 2.0), Quat::from_rotation_y(PI)).matrix();
    let camera = Pose::from_translation(Vec3::new(0.0, 0.0, 1.0)).matrix();

    let first = virtual_camera_transform(&destination, &source, &camera);
    let second = virtual_camera_transform(&destination, &source, &first);

    assert!(first.w_axis.truncate().abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-5));
    assert!(second.w_axis.truncate().abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-5));
}

// ============================================================================
// portal_clip_plane
// ============================================================================

#[test]
fn test_clip_plane_world_space() {
    // Identity view: plane is expressed directly in world space
    let portal = Pose::from_translation(Vec3::new(0.0, 0.0, -3.0)).matrix();
    let plane = portal_clip_plane(&portal, &Mat4::IDENTITY);
    assert!(plane.abs_diff_eq(Vec4::new(0.0, 0.0, -1.0, -3.0), 1e-6));

    // Camera at origin (in front of the portal) is on the negative side
    assert!(plane.dot(Vec4::new(0.0, 0.0, 0.0, 1.0)) < 0.0);
    // A point behind the portal is on the positive side
    assert!(plane.dot(Vec4::new(0.0, 0.0, -10.0, 1.0)) > 0.0);
}

#[test]
fn test_clip_plane_contains_portal_points_in_camera_space() {
    let portal_pose = Pose::new(Vec3::new(2.0, 7.0, -3.0), Quat::from_rotation_y(PI * 1.5));
    let camera_pose = Pose::new(Vec3::new(0.0, 1.0, 0.0), Quat::from_rotation_y(0.3));
    let view = camera_pose.inverse_matrix();

    let plane = portal_clip_plane(&portal_pose.matrix(), &view);

    // Any point of the portal surface (local z = 0) lies on the plane
    for local in [Vec3::ZERO, Vec3::new(4.0, 4.0, 0.0), Vec3::new(-4.0, 2.0, 0.0)] {
        let world = portal_pose.matrix().transform_point3(local);
        let cam = view.transform_point3(world);
        assert!(plane.dot(cam.extend(1.0)).abs() < 1e-4);
    }

    // Unit normal is preserved by the rigid view transform
    assert!((plane.truncate().length() - 1.0).abs() < 1e-5);
}
