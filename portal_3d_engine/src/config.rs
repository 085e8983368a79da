//! Portal rendering configuration.
//!
//! Adjustable at runtime; setters clamp out-of-range values and log a
//! warning instead of failing.

use crate::engine_warn;
use crate::scene::{rgb8, Color};

/// Deepest supported recursion. The seed level plus 254 nested levels fill
/// an 8-bit stencil buffer (values 1..=255).
pub const MAX_RECURSION_DEPTH: usize = 254;

/// Recursion depth used when nothing else is configured.
pub const DEFAULT_MAX_RECURSION: usize = 16;

/// Portal pipeline settings
#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    max_recursion: usize,
    clear_color: Color,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            max_recursion: DEFAULT_MAX_RECURSION,
            clear_color: rgb8(175, 175, 175),
        }
    }
}

impl PortalConfig {
    /// Builder-style recursion depth (clamped like `set_max_recursion`).
    pub fn with_max_recursion(mut self, depth: i64) -> Self {
        self.set_max_recursion(depth);
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Recursion depth: chains hold `max_recursion + 1` levels.
    pub fn max_recursion(&self) -> usize {
        self.max_recursion
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Set the recursion depth, clamped to `[0, MAX_RECURSION_DEPTH]`.
    ///
    /// Returns the value actually stored.
    pub fn set_max_recursion(&mut self, depth: i64) -> usize {
        let clamped = depth.clamp(0, MAX_RECURSION_DEPTH as i64) as usize;
        if clamped as i64 != depth {
            engine_warn!(
                "portal3d::PortalConfig",
                "Recursion depth {} out of range, clamped to {}",
                depth,
                clamped
            );
        }
        self.max_recursion = clamped;
        clamped
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
