//! Demo settings, read from `PORTAL3D_*` environment variables.

use portal_3d_engine::portal3d::DEFAULT_MAX_RECURSION;
use std::path::PathBuf;

pub const ENV_RECURSION: &str = "PORTAL3D_RECURSION";
pub const ENV_FRAMES: &str = "PORTAL3D_FRAMES";
pub const ENV_WIDTH: &str = "PORTAL3D_WIDTH";
pub const ENV_HEIGHT: &str = "PORTAL3D_HEIGHT";
pub const ENV_SCREENSHOT: &str = "PORTAL3D_SCREENSHOT";
pub const ENV_SEED: &str = "PORTAL3D_SEED";

#[derive(Debug, Clone, PartialEq)]
pub struct DemoSettings {
    pub width: u32,
    pub height: u32,
    /// Frames rendered before exiting
    pub frames: u64,
    /// Requested portal recursion; clamped by the engine config
    pub max_recursion: i64,
    /// Where to write the last frame as PNG
    pub screenshot: Option<PathBuf>,
    /// Pillar placement seed
    pub seed: u64,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            frames: 120,
            max_recursion: DEFAULT_MAX_RECURSION as i64,
            screenshot: None,
            seed: 7,
        }
    }
}

impl DemoSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup; unparsable values keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |name: &str| lookup(name).and_then(|value| value.trim().parse::<i64>().ok());

        Self {
            width: parsed(ENV_WIDTH).and_then(|v| u32::try_from(v).ok()).unwrap_or(defaults.width),
            height: parsed(ENV_HEIGHT).and_then(|v| u32::try_from(v).ok()).unwrap_or(defaults.height),
            frames: parsed(ENV_FRAMES).and_then(|v| u64::try_from(v).ok()).unwrap_or(defaults.frames),
            max_recursion: parsed(ENV_RECURSION).unwrap_or(defaults.max_recursion),
            screenshot: lookup(ENV_SCREENSHOT)
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            seed: parsed(ENV_SEED).and_then(|v| u64::try_from(v).ok()).unwrap_or(defaults.seed),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
