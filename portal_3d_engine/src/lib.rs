/*!
# Portal 3D Engine

Core of a see-through portal renderer.

A portal is a flat surface linked to a partner surface; looking into one
shows the world as seen from the other, recursively. This crate computes
the virtual cameras for every recursion level and issues the
stencil-buffer draw sequence that composites them. It never touches pixels
itself: drawing goes through the `CommandList` trait, implemented by a
backend crate (see `portal_3d_engine_renderer_soft`).

## Architecture

- **math**: poses, the portal-to-portal camera transform, oblique near-plane clipping
- **camera**: perspective camera, render camera, frustum
- **portal**: portals and links, camera chains, the stencil sequencer
- **renderer**: render state and the `CommandList`/`Drawable` traits
- **scene**: flat-colored meshes and the scene container
- **frame**: update/render driving with an Active/Idle run mode
- **world**: the explicit context tying it all together
*/

// Internal modules
mod error;
pub mod log;
pub mod math;
pub mod camera;
pub mod renderer;
pub mod scene;
pub mod portal;
pub mod config;
pub mod frame;
pub mod world;

// Main portal3d namespace module
pub mod portal3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Explicit rendering context
    pub use crate::world::PortalWorld;
    pub use crate::config::{PortalConfig, DEFAULT_MAX_RECURSION, MAX_RECURSION_DEPTH};
    pub use crate::frame::{FrameDriver, Renderable, RunMode, Updatable};

    // Logging sub-module (types and functions, NOT macros)
    pub mod log {
        pub use crate::log::{
            enabled, log, log_detailed, min_severity, reset_logger, set_logger, set_min_severity,
            DefaultLogger, LogEntry, LogSeverity, Logger,
        };
    }

    // Render sub-module with all rendering types
    pub mod render {
        pub use crate::renderer::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod math {
        pub use crate::math::*;
    }

    pub mod portal {
        pub use crate::portal::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }
}

pub use error::{Error, Result};

// Re-export math library at crate root
pub use glam;
