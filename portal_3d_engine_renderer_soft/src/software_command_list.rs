/// SoftwareCommandList - CPU implementation of the CommandList trait
///
/// Executes every command immediately against an owned framebuffer. The
/// fixed-function state lives in a `RenderState` snapshot that each draw
/// reads.

use portal_3d_engine::portal3d::{Error, Result};
use portal_3d_engine::portal3d::camera::RenderCamera;
use portal_3d_engine::portal3d::render::{
    Capability, ClearFlags, ClearValues, ColorWriteMask, CommandList, CompareOp, CullMode,
    Drawable, RenderState, StencilOp,
};
use portal_3d_engine::{engine_debug, engine_error};
#[cfg(feature = "draw-tracing")]
use portal_3d_engine::engine_trace;

use crate::framebuffer::Framebuffer;
use crate::rasterizer;
use crate::stats::RendererStats;

/// CPU command list
pub struct SoftwareCommandList {
    framebuffer: Framebuffer,
    state: RenderState,
    stats: RendererStats,
    /// Set by `lose_context`; every later command fails
    context_lost: bool,
}

impl SoftwareCommandList {
    /// Create a command list rendering into a `width` x `height` framebuffer.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let framebuffer = Framebuffer::new(width, height)?;
        engine_debug!("portal3d::soft", "Software command list created ({}x{})", width, height);
        Ok(Self {
            framebuffer,
            state: RenderState::default(),
            stats: RendererStats::default(),
            context_lost: false,
        })
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Current fixed-function state
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn stats(&self) -> RendererStats {
        self.stats
    }

    /// Return the counters and start a new period.
    pub fn take_stats(&mut self) -> RendererStats {
        std::mem::take(&mut self.stats)
    }

    /// Replace the framebuffer with a new size. Contents are reset.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.framebuffer = Framebuffer::new(width, height)?;
        Ok(())
    }

    /// Simulate a lost device: every subsequent command returns
    /// `Error::DeviceLost`.
    pub fn lose_context(&mut self) {
        engine_error!("portal3d::soft", "Rendering context lost");
        self.context_lost = true;
    }

    pub fn is_context_lost(&self) -> bool {
        self.context_lost
    }

    fn ensure_context(&self) -> Result<()> {
        if self.context_lost {
            return Err(Error::DeviceLost("Software rendering context was lost".to_string()));
        }
        Ok(())
    }
}

impl CommandList for SoftwareCommandList {
    fn clear(&mut self, flags: ClearFlags, values: &ClearValues) -> Result<()> {
        self.ensure_context()?;
        self.framebuffer.clear(flags, values, &self.state);
        self.stats.clears += 1;
        Ok(())
    }

    fn enable(&mut self, capability: Capability) -> Result<()> {
        self.ensure_context()?;
        self.state.set_capability(capability, true);
        Ok(())
    }

    fn disable(&mut self, capability: Capability) -> Result<()> {
        self.ensure_context()?;
        self.state.set_capability(capability, false);
        Ok(())
    }

    fn set_cull_mode(&mut self, mode: CullMode) -> Result<()> {
        self.ensure_context()?;
        self.state.cull_mode = mode;
        Ok(())
    }

    fn set_depth_func(&mut self, func: CompareOp) -> Result<()> {
        self.ensure_context()?;
        self.state.depth_func = func;
        Ok(())
    }

    fn set_depth_mask(&mut self, enabled: bool) -> Result<()> {
        self.ensure_context()?;
        self.state.depth_write = enabled;
        Ok(())
    }

    fn set_stencil_func(&mut self, func: CompareOp, reference: u32, compare_mask: u32) -> Result<()> {
        self.ensure_context()?;
        self.state.stencil.func = func;
        self.state.stencil.reference = reference;
        self.state.stencil.compare_mask = compare_mask;
        Ok(())
    }

    fn set_stencil_mask(&mut self, write_mask: u32) -> Result<()> {
        self.ensure_context()?;
        self.state.stencil.write_mask = write_mask;
        Ok(())
    }

    fn set_stencil_op(&mut self, fail: StencilOp, depth_fail: StencilOp, pass: StencilOp) -> Result<()> {
        self.ensure_context()?;
        self.state.stencil.fail_op = fail;
        self.state.stencil.depth_fail_op = depth_fail;
        self.state.stencil.pass_op = pass;
        Ok(())
    }

    fn set_color_mask(&mut self, mask: ColorWriteMask) -> Result<()> {
        self.ensure_context()?;
        self.state.color_mask = mask;
        Ok(())
    }

    fn draw(&mut self, drawable: &dyn Drawable, camera: &RenderCamera) -> Result<()> {
        self.ensure_context()?;
        self.stats.draw_calls += 1;

        #[cfg(feature = "draw-tracing")]
        let before = self.stats;

        let framebuffer = &mut self.framebuffer;
        let state = &self.state;
        let stats = &mut self.stats;
        drawable.visit_meshes(&mut |mesh, model| {
            rasterizer::draw_mesh(framebuffer, state, mesh, model, camera, stats);
        });

        #[cfg(feature = "draw-tracing")]
        engine_trace!(
            "portal3d::soft",
            "draw '{}': {} triangles, {} fragments passed",
            drawable.label(),
            self.stats.triangles_rasterized - before.triangles_rasterized,
            self.stats.fragments_passed - before.fragments_passed
        );

        Ok(())
    }
}

#[cfg(test)]
#[path = "software_command_list_tests.rs"]
mod tests;
