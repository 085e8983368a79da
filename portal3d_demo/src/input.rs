//! Input snapshot - keyboard and mouse state queried once per update.
//!
//! The host feeds window events in; the frame's update reads pressed keys
//! and consumes the mouse motion accumulated since the previous frame.

use glam::Vec2;
use portal_3d_engine::portal3d::RunMode;
use rustc_hash::FxHashSet;
use winit::keyboard::KeyCode;

#[derive(Debug, Default)]
pub struct InputSnapshot {
    pressed_keys: FxHashSet<KeyCode>,
    mouse_delta: Vec2,
    mode_request: Option<RunMode>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape requests Idle, Enter requests Active.
    pub fn press_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Escape => self.mode_request = Some(RunMode::Idle),
            KeyCode::Enter => self.mode_request = Some(RunMode::Active),
            _ => {}
        }
        self.pressed_keys.insert(key);
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.pressed_keys.remove(&key);
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// `1.0`, `-1.0` or `0.0` depending on which of the two keys is held.
    pub fn axis(&self, positive: KeyCode, negative: KeyCode) -> f32 {
        let mut value = 0.0;
        if self.is_pressed(positive) {
            value += 1.0;
        }
        if self.is_pressed(negative) {
            value -= 1.0;
        }
        value
    }

    /// A click captures the pointer: request Active.
    pub fn click(&mut self) {
        self.mode_request = Some(RunMode::Active);
    }

    pub fn add_mouse_delta(&mut self, delta: Vec2) {
        self.mouse_delta += delta;
    }

    /// Motion accumulated since the last call.
    pub fn take_mouse_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.mouse_delta)
    }

    /// The latest requested run mode, if any, consumed.
    pub fn take_mode_request(&mut self) -> Option<RunMode> {
        self.mode_request.take()
    }

    /// Drop held keys and pending motion (focus lost).
    pub fn clear(&mut self) {
        self.pressed_keys.clear();
        self.mouse_delta = Vec2::ZERO;
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
