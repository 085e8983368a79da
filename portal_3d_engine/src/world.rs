/// Portal world - the explicit per-application rendering context.
///
/// Owns the scene, the portals, the primary camera and the configuration,
/// plus the render data rebuilt from them each frame. Hosts pass it by
/// reference into their update/render code instead of reaching for
/// process-wide state.

use crate::camera::PerspectiveCamera;
use crate::config::PortalConfig;
use crate::engine_debug;
use crate::error::Result;
use crate::portal::{build_render_data, FrameStats, PortalFrame, PortalRenderData, PortalRenderer, PortalSet};
use crate::renderer::CommandList;
use crate::scene::Scene;

pub struct PortalWorld {
    pub scene: Scene,
    pub portals: PortalSet,
    pub camera: PerspectiveCamera,
    pub config: PortalConfig,
    render_data: Vec<PortalRenderData>,
    renderer: PortalRenderer,
    last_stats: Option<FrameStats>,
}

impl PortalWorld {
    pub fn new(scene: Scene, portals: PortalSet, camera: PerspectiveCamera, config: PortalConfig) -> Self {
        engine_debug!(
            "portal3d::PortalWorld",
            "World created: {} objects, {} portals, recursion {}",
            scene.len(),
            portals.len(),
            config.max_recursion()
        );
        Self {
            scene,
            portals,
            camera,
            config,
            render_data: Vec::new(),
            renderer: PortalRenderer::new(),
            last_stats: None,
        }
    }

    /// Rebuild every linked portal's camera chain from the current poses.
    pub fn rebuild_render_data(&mut self) -> &[PortalRenderData] {
        self.render_data = build_render_data(&self.portals, &self.camera, self.config.max_recursion());
        &self.render_data
    }

    /// Rebuild the chains and issue one full frame.
    pub fn render(&mut self, cmd: &mut dyn CommandList) -> Result<FrameStats> {
        self.rebuild_render_data();

        let frame = PortalFrame {
            scene: &self.scene,
            portals: &self.portals,
            camera: &self.camera,
            render_data: &self.render_data,
            clear_color: self.config.clear_color(),
        };
        let stats = self.renderer.render_frame(cmd, &frame)?;
        self.last_stats = Some(stats);
        Ok(stats)
    }

    /// Chains from the last rebuild
    pub fn render_data(&self) -> &[PortalRenderData] {
        &self.render_data
    }

    /// Counters of the last successful frame
    pub fn last_stats(&self) -> Option<FrameStats> {
        self.last_stats
    }

    pub fn frames_rendered(&self) -> u64 {
        self.renderer.frames_rendered()
    }
}

#[cfg(test)]
#[path = "world_tests.rs"]
mod tests;
