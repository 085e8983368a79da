/// Portal renderer - the stencil-buffer draw sequence for one frame.
///
/// For each linked portal the sequencer marks the portal's screen
/// footprint in the stencil buffer, carves one nested region per chain
/// level (shallow to deep), then paints the scene level by level from the
/// deepest region back to the real camera, decrementing the stencil as it
/// goes. Every portal leaves the stencil buffer at zero. A final composite
/// pass lays down portal depth, opaque unlinked portals and the scene seen
/// by the real camera.
///
/// Stencil level k+1 marks the pixels showing chain level k.

use rustc_hash::FxHashSet;
use crate::camera::{PerspectiveCamera, RenderCamera};
use crate::engine_error;
use crate::engine_trace;
use crate::error::{Error, Result};
use crate::renderer::{
    Capability, ClearFlags, ClearValues, ColorWriteMask, CommandList, CompareOp, CullMode,
    Drawable, StencilOp,
};
use crate::scene::Color;
use super::camera_chain::{ChainEntry, PortalRenderData};
use super::portal::{Portal, PortalKey, PortalSet};

const STENCIL_ALL: u32 = 0xFF;
const STENCIL_NONE: u32 = 0x00;

/// Everything one frame is rendered from
pub struct PortalFrame<'a> {
    pub scene: &'a dyn Drawable,
    pub portals: &'a PortalSet,
    pub camera: &'a PerspectiveCamera,
    /// Chains built this frame, one per linked portal
    pub render_data: &'a [PortalRenderData],
    pub clear_color: Color,
}

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Linked portals run through the stencil sequence
    pub portals_sequenced: usize,
    /// Unlinked portals drawn as opaque surfaces
    pub unlinked_drawn: usize,
    /// Nested stencil regions carved
    pub carve_draws: usize,
    /// Scene draws through a virtual camera
    pub virtual_paints: usize,
    pub draw_calls: usize,
    /// Non-draw commands, clears included
    pub state_changes: usize,
}

/// Stencil-buffer portal sequencer
#[derive(Debug, Default)]
pub struct PortalRenderer {
    frames_rendered: u64,
}

impl PortalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Issue the full frame. A backend failure aborts the frame and is
    /// returned unchanged.
    pub fn render_frame(&mut self, cmd: &mut dyn CommandList, frame: &PortalFrame<'_>) -> Result<FrameStats> {
        let mut sequencer = Sequencer {
            cmd,
            stats: FrameStats::default(),
            clear_values: ClearValues { color: frame.clear_color, ..ClearValues::default() },
        };

        match sequencer.frame(frame) {
            Ok(()) => {
                self.frames_rendered += 1;
                engine_trace!(
                    "portal3d::PortalRenderer",
                    "Frame {}: {:?}",
                    self.frames_rendered,
                    sequencer.stats
                );
                Ok(sequencer.stats)
            }
            Err(err) => {
                engine_error!("portal3d::PortalRenderer", "Frame aborted: {}", err);
                Err(err)
            }
        }
    }
}

// ===== SEQUENCER =====

/// Command list wrapper counting what it issues
struct Sequencer<'c> {
    cmd: &'c mut dyn CommandList,
    stats: FrameStats,
    clear_values: ClearValues,
}

impl Sequencer<'_> {
    fn frame(&mut self, frame: &PortalFrame<'_>) -> Result<()> {
        let real = frame.camera.render_camera();

        self.setup()?;

        for data in frame.render_data {
            let portal = frame.portals.get(data.portal).ok_or_else(|| {
                Error::InvalidResource("Render data refers to a removed portal".to_string())
            })?;
            let cameras: Vec<RenderCamera> = data.chain.iter().map(ChainEntry::render_camera).collect();
            debug_assert!(!cameras.is_empty(), "camera chains always hold the base level");
            self.sequence_portal(portal, &cameras, frame.scene, &real)?;
        }

        self.composite(frame, &real)
    }

    /// Clear everything and enable the tests. Write masks are opened first
    /// because clears honour them.
    fn setup(&mut self) -> Result<()> {
        self.color_mask(ColorWriteMask::ALL)?;
        self.depth_mask(true)?;
        self.stencil_mask(STENCIL_ALL)?;
        self.clear(ClearFlags::COLOR | ClearFlags::DEPTH | ClearFlags::STENCIL)?;

        self.set_cull_mode(CullMode::Back)?;
        self.enable(Capability::CullFace)?;
        self.enable(Capability::DepthTest)?;
        self.depth_func(CompareOp::Less)?;
        self.enable(Capability::StencilTest)
    }

    fn sequence_portal(
        &mut self,
        portal: &Portal,
        cameras: &[RenderCamera],
        scene: &dyn Drawable,
        real: &RenderCamera,
    ) -> Result<()> {
        let levels = cameras.len();
        self.stats.portals_sequenced += 1;

        // Seed: portal footprint (visible to the real camera) -> 1
        self.enable(Capability::StencilTest)?;
        self.enable(Capability::DepthTest)?;
        self.stencil_mask(STENCIL_ALL)?;
        self.stencil_func(CompareOp::Equal, 0)?;
        self.stencil_op(StencilOp::Zero, StencilOp::Zero, StencilOp::IncrementAndClamp)?;
        self.depth_mask(false)?;
        self.color_mask(ColorWriteMask::NONE)?;
        self.draw(portal, real)?;
        self.disable(Capability::DepthTest)?;

        // Carve, shallow to deep: inside level k+1, the portal seen by camera k -> k+2
        for (k, camera) in cameras.iter().enumerate().take(levels - 1) {
            let level = k as u32 + 1;
            self.stencil_mask(STENCIL_ALL)?;
            self.stencil_func(CompareOp::NotEqual, level)?;
            self.stencil_op(StencilOp::IncrementAndClamp, StencilOp::Keep, StencilOp::Keep)?;
            self.depth_mask(false)?;
            self.color_mask(ColorWriteMask::NONE)?;
            self.draw(portal, camera)?;
            self.stats.carve_draws += 1;
        }
        self.enable(Capability::DepthTest)?;

        // Paint, deep to shallow
        for k in (1..levels).rev() {
            let level = k as u32 + 1;

            self.stencil_mask(STENCIL_NONE)?;
            self.stencil_func(CompareOp::Equal, level)?;
            self.color_mask(ColorWriteMask::ALL)?;
            self.depth_mask(true)?;
            self.draw(scene, &cameras[k])?;
            self.stats.virtual_paints += 1;

            // Portal depth from the enclosing level, so level k-1 paints around it
            self.stencil_mask(STENCIL_NONE)?;
            self.stencil_func(CompareOp::Equal, level)?;
            self.color_mask(ColorWriteMask::NONE)?;
            self.depth_mask(true)?;
            self.clear(ClearFlags::DEPTH)?;
            self.draw(portal, &cameras[k - 1])?;

            // Hand the region back to level k
            self.stencil_mask(STENCIL_ALL)?;
            self.stencil_func(CompareOp::NotEqual, level)?;
            self.stencil_op(StencilOp::DecrementAndClamp, StencilOp::Keep, StencilOp::Keep)?;
            self.color_mask(ColorWriteMask::NONE)?;
            self.depth_mask(false)?;
            self.draw(portal, &cameras[k - 1])?;
        }

        // Base level through chain camera 0
        self.stencil_mask(STENCIL_NONE)?;
        self.stencil_func(CompareOp::Equal, 1)?;
        self.color_mask(ColorWriteMask::ALL)?;
        self.depth_mask(true)?;
        self.draw(scene, &cameras[0])?;
        self.stats.virtual_paints += 1;

        self.color_mask(ColorWriteMask::NONE)?;
        self.depth_mask(true)?;
        self.depth_func(CompareOp::Always)?;
        self.clear(ClearFlags::DEPTH)?;
        self.draw(portal, real)?;
        self.depth_func(CompareOp::Less)?;

        // Back to zero
        self.stencil_mask(STENCIL_ALL)?;
        self.stencil_func(CompareOp::NotEqual, 1)?;
        self.stencil_op(StencilOp::DecrementAndClamp, StencilOp::Keep, StencilOp::Keep)?;
        self.color_mask(ColorWriteMask::NONE)?;
        self.depth_mask(false)?;
        self.draw(portal, real)
    }

    /// Real-camera pass: portal depth, opaque unlinked portals, then the scene.
    fn composite(&mut self, frame: &PortalFrame<'_>, real: &RenderCamera) -> Result<()> {
        self.disable(Capability::StencilTest)?;
        self.stencil_mask(STENCIL_NONE)?;
        self.depth_mask(true)?;
        self.clear(ClearFlags::DEPTH)?;
        self.enable(Capability::DepthTest)?;
        self.depth_func(CompareOp::Less)?;

        let linked: FxHashSet<PortalKey> = frame.render_data.iter().map(|data| data.portal).collect();

        self.color_mask(ColorWriteMask::NONE)?;
        for (_, portal) in frame.portals.iter().filter(|(key, _)| linked.contains(key)) {
            self.draw(portal, real)?;
        }

        self.color_mask(ColorWriteMask::ALL)?;
        for (_, portal) in frame.portals.iter().filter(|(key, _)| !linked.contains(key)) {
            self.draw(portal, real)?;
            self.stats.unlinked_drawn += 1;
        }

        self.draw(frame.scene, real)
    }

    // ===== COUNTED COMMANDS =====

    fn clear(&mut self, flags: ClearFlags) -> Result<()> {
        self.stats.state_changes += 1;
        let values = self.clear_values;
        self.cmd.clear(flags, &values)
    }

    fn enable(&mut self, capability: Capability) -> Result<()> {
        self.stats.state_changes += 1;
        self.cmd.enable(capability)
    }

    fn disable(&mut self, capability: Capability) -> Result<()> {
        self.stats.state_changes += 1;
        self.cmd.disable(capability)
    }

    fn set_cull_mode(&mut self, mode: CullMode) -> Result<()> {
        self.stats.state_changes += 1;
        self.cmd.set_cull_mode(mode)
    }

    fn depth_func(&mut self, func: CompareOp) -> Result<()> {
        self.stats.state_changes += 1;
        self.cmd.set_depth_func(func)
    }

    fn depth_mask(&mut self, enabled: bool) -> Result<()> {
        self.stats.state_changes += 1;
        self.cmd.set_depth_mask(enabled)
    }

    fn stencil_func(&mut self, func: CompareOp, reference: u32) -> Result<()> {
        self.stats.state_changes += 1;
        self.cmd.set_stencil_func(func, reference, STENCIL_ALL)
    }

    fn stencil_mask(&mut self, mask: u32) -> Result<()> {
        self.stats.state_changes += 1;
        self.cmd.set_stencil_mask(mask)
    }

    fn stencil_op(&mut self, fail: StencilOp, depth_fail: StencilOp, pass: StencilOp) -> Result<()> {
        self.stats.state_changes += 1;
        self.cmd.set_stencil_op(fail, depth_fail, pass)
    }

    fn color_mask(&mut self, mask: ColorWriteMask) -> Result<()> {
        self.stats.state_changes += 1;
        self.cmd.set_color_mask(mask)
    }

    fn draw(&mut self, drawable: &dyn Drawable, camera: &RenderCamera) -> Result<()> {
        self.stats.draw_calls += 1;
        self.cmd.draw(drawable, camera)
    }
}

#[cfg(test)]
#[path = "portal_renderer_tests.rs"]
mod tests;
