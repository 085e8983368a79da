//! Frame driving - update then render, once per refresh.
//!
//! The driver owns the run mode and the frame clock. Whatever it drives
//! implements `Updatable` and `Renderable` against an explicit context
//! (typically `PortalWorld`); nothing here is global.

use crate::engine_debug;
use crate::error::Result;
use crate::renderer::CommandList;

/// Whether the application has focus (pointer captured) or is paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Active,
    Idle,
}

/// Per-frame state update
pub trait Updatable<Ctx: ?Sized> {
    /// Advance by `dt` seconds while active
    fn update(&mut self, ctx: &mut Ctx, dt: f32) -> Result<()>;

    /// Advance while idle. Does nothing by default.
    fn update_idle(&mut self, _ctx: &mut Ctx, _dt: f32) -> Result<()> {
        Ok(())
    }
}

/// Per-frame rendering
pub trait Renderable<Ctx: ?Sized> {
    /// Render a frame while active
    fn render(&mut self, ctx: &mut Ctx, cmd: &mut dyn CommandList, dt: f32) -> Result<()>;

    /// Render while idle. Renders as if active by default.
    fn render_idle(&mut self, ctx: &mut Ctx, cmd: &mut dyn CommandList, dt: f32) -> Result<()> {
        self.render(ctx, cmd, dt)
    }
}

/// Drives update/render and keeps the frame clock
#[derive(Debug, Default)]
pub struct FrameDriver {
    mode: RunMode,
    frame_index: u64,
    elapsed: f64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RunMode) {
        if mode != self.mode {
            engine_debug!("portal3d::FrameDriver", "Run mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Frames completed so far
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Seconds accumulated over completed frames
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Run one frame: update, then render, dispatching on the run mode.
    ///
    /// A failing update or render aborts the frame without advancing the
    /// clock.
    pub fn frame<Ctx, R>(
        &mut self,
        ctx: &mut Ctx,
        root: &mut R,
        cmd: &mut dyn CommandList,
        dt: f32,
    ) -> Result<()>
    where
        Ctx: ?Sized,
        R: Updatable<Ctx> + Renderable<Ctx> + ?Sized,
    {
        match self.mode {
            RunMode::Active => {
                root.update(ctx, dt)?;
                root.render(ctx, cmd, dt)?;
            }
            RunMode::Idle => {
                root.update_idle(ctx, dt)?;
                root.render_idle(ctx, cmd, dt)?;
            }
        }

        self.frame_index += 1;
        self.elapsed += dt as f64;
        Ok(())
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
