use glam::{Mat4, Quat, Vec3};
use super::*;

fn approx_mat(a: &Mat4, b: &Mat4) -> bool {
    a.abs_diff_eq(*b, 1e-5)
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_identity_pose_matrix() {
    assert_eq!(Pose::IDENTITY.matrix(), Mat4::IDENTITY);
    assert_eq!(Pose::default(), Pose::IDENTITY);
}

#[test]
fn test_from_translation() {
    let pose = Pose::from_translation(Vec3::new(1.0, 2.0, 3.0));
    let m = pose.matrix();
    assert_eq!(m.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(pose.forward(), Vec3::Z);
}

#[test]
fn test_from_euler_matches_three_axis_product() {
    let (x, y, z) = (0.3, 1.2, -0.4);
    let pose = Pose::from_euler_xyz(Vec3::ZERO, x, y, z);
    let expected = Mat4::from_rotation_x(x) * Mat4::from_rotation_y(y) * Mat4::from_rotation_z(z);
    assert!(approx_mat(&pose.matrix(), &expected));
}

#[test]
fn test_from_matrix_roundtrip() {
    let pose = Pose::new(Vec3::new(-5.0, 7.0, -3.0), Quat::from_rotation_y(0.5));
    let back = Pose::from_matrix(&pose.matrix());
    assert!(back.position.abs_diff_eq(pose.position, 1e-5));
    assert!(back.rotation.abs_diff_eq(pose.rotation, 1e-5));
}

// ============================================================================
// Derived quantities
// ============================================================================

#[test]
fn test_inverse_matrix_matches_general_inverse() {
    let pose = Pose::new(Vec3::new(2.0, 7.0, -3.0), Quat::from_rotation_y(std::f32::consts::PI * 1.5));
    assert!(approx_mat(&pose.inverse_matrix(), &pose.matrix().inverse()));
    assert!(approx_mat(&(pose.matrix() * pose.inverse_matrix()), &Mat4::IDENTITY));
}

#[test]
fn test_forward_follows_rotation() {
    // Facing +X after a quarter turn about Y
    let pose = Pose::from_euler_xyz(Vec3::ZERO, 0.0, std::f32::consts::FRAC_PI_2, 0.0);
    assert!(pose.forward().abs_diff_eq(Vec3::X, 1e-6));
    assert!(pose.up().abs_diff_eq(Vec3::Y, 1e-6));
}
