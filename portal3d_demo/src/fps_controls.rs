//! First-person controls
//!
//! WASD moves in the horizontal plane along the view direction, R/F move
//! straight up/down; the combined direction is normalized so diagonals are
//! not faster. Mouse motion turns the view (yaw about world Y, then pitch),
//! with pitch clamped to straight up/down.

use glam::{EulerRot, Quat, Vec2, Vec3};
use portal_3d_engine::portal3d::math::Pose;
use std::f32::consts::FRAC_PI_2;
use winit::keyboard::KeyCode;
use crate::input::InputSnapshot;

/// Units per second
pub const DEFAULT_MOVE_SPEED: f32 = 4.0;
/// Radians per pixel of mouse motion
pub const DEFAULT_SENSITIVITY: f32 = 0.002;

#[derive(Debug, Clone)]
pub struct FpsControls {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    move_speed: f32,
    sensitivity: f32,
}

impl FpsControls {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            move_speed: DEFAULT_MOVE_SPEED,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }

    pub fn with_move_speed(mut self, move_speed: f32) -> Self {
        self.move_speed = move_speed;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Yaw, then pitch (YXZ order), no roll
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Camera pose for the current position and look angles
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation())
    }

    /// World view direction (the camera looks down its local -Z)
    pub fn direction(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Turn the view by a mouse delta in pixels.
    pub fn mouse_look(&mut self, delta: Vec2) {
        self.pitch = (self.pitch - delta.y * self.sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
        self.yaw -= delta.x * self.sensitivity;
    }

    /// Unit movement direction for the held keys (zero when idle).
    pub fn movement_direction(&self, input: &InputSnapshot) -> Vec3 {
        let direction = self.direction();
        let planar = Vec3::new(direction.x, 0.0, direction.z);
        let right = direction.cross(Vec3::Y);

        let velocity = planar * input.axis(KeyCode::KeyW, KeyCode::KeyS)
            + right * input.axis(KeyCode::KeyD, KeyCode::KeyA)
            + Vec3::Y * input.axis(KeyCode::KeyR, KeyCode::KeyF);
        velocity.normalize_or_zero()
    }

    /// Apply the frame's mouse motion, then move for `dt` seconds.
    pub fn update(&mut self, input: &mut InputSnapshot, dt: f32) {
        self.mouse_look(input.take_mouse_delta());
        self.position += self.movement_direction(input) * self.move_speed * dt;
    }
}

#[cfg(test)]
#[path = "fps_controls_tests.rs"]
mod tests;
