/// Mock CommandList for unit tests (no rasterizer required)
///
/// Records every call as a `Command`, tracks the resulting `RenderState`
/// and snapshots it at each draw, so tests can assert both the exact call
/// sequence and the masks in effect for every draw.

use crate::camera::RenderCamera;
use crate::engine_bail;
use crate::error::Result;
use crate::renderer::{
    Capability, ClearFlags, ClearValues, ColorWriteMask, CommandList, CompareOp, CullMode,
    Drawable, RenderState, StencilOp,
};

// ============================================================================
// Recorded commands
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Clear { flags: ClearFlags, values: ClearValues },
    Enable(Capability),
    Disable(Capability),
    CullMode(CullMode),
    DepthFunc(CompareOp),
    DepthMask(bool),
    StencilFunc { func: CompareOp, reference: u32, compare_mask: u32 },
    StencilMask(u32),
    StencilOp { fail: StencilOp, depth_fail: StencilOp, pass: StencilOp },
    ColorMask(ColorWriteMask),
    Draw(DrawRecord),
}

/// A recorded draw with the state it was issued under
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub label: String,
    pub camera: RenderCamera,
    pub state: RenderState,
}

// ============================================================================
// Mock CommandList
// ============================================================================

#[derive(Debug, Default)]
pub struct MockCommandList {
    pub commands: Vec<Command>,
    pub state: RenderState,
    /// Fail every call after this many successful commands
    pub fail_after: Option<usize>,
}

impl MockCommandList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that reports a lost device once `count` commands were recorded
    pub fn failing_after(count: usize) -> Self {
        Self { fail_after: Some(count), ..Self::default() }
    }

    /// Recorded draws, in order
    pub fn draws(&self) -> Vec<&DrawRecord> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                Command::Draw(record) => Some(record),
                _ => None,
            })
            .collect()
    }

    /// Labels of recorded draws, in order
    pub fn draw_labels(&self) -> Vec<&str> {
        self.draws().into_iter().map(|record| record.label.as_str()).collect()
    }

    /// Number of non-draw commands
    pub fn state_change_count(&self) -> usize {
        self.commands.iter().filter(|c| !matches!(c, Command::Draw(_))).count()
    }

    fn record(&mut self, command: Command) -> Result<()> {
        if let Some(limit) = self.fail_after {
            if self.commands.len() >= limit {
                return Err(crate::error::Error::DeviceLost("mock context lost".to_string()));
            }
        }
        self.commands.push(command);
        Ok(())
    }
}

impl CommandList for MockCommandList {
    fn clear(&mut self, flags: ClearFlags, values: &ClearValues) -> Result<()> {
        if flags.is_empty() {
            engine_bail!("portal3d::mock", "clear called with no buffers selected");
        }
        self.record(Command::Clear { flags, values: *values })
    }

    fn enable(&mut self, capability: Capability) -> Result<()> {
        self.record(Command::Enable(capability))?;
        self.state.set_capability(capability, true);
        Ok(())
    }

    fn disable(&mut self, capability: Capability) -> Result<()> {
        self.record(Command::Disable(capability))?;
        self.state.set_capability(capability, false);
        Ok(())
    }

    fn set_cull_mode(&mut self, mode: CullMode) -> Result<()> {
        self.record(Command::CullMode(mode))?;
        self.state.cull_mode = mode;
        Ok(())
    }

    fn set_depth_func(&mut self, func: CompareOp) -> Result<()> {
        self.record(Command::DepthFunc(func))?;
        self.state.depth_func = func;
        Ok(())
    }

    fn set_depth_mask(&mut self, enabled: bool) -> Result<()> {
        self.record(Command::DepthMask(enabled))?;
        self.state.depth_write = enabled;
        Ok(())
    }

    fn set_stencil_func(&mut self, func: CompareOp, reference: u32, compare_mask: u32) -> Result<()> {
        self.record(Command::StencilFunc { func, reference, compare_mask })?;
        self.state.stencil.func = func;
        self.state.stencil.reference = reference;
        self.state.stencil.compare_mask = compare_mask;
        Ok(())
    }

    fn set_stencil_mask(&mut self, write_mask: u32) -> Result<()> {
        self.record(Command::StencilMask(write_mask))?;
        self.state.stencil.write_mask = write_mask;
        Ok(())
    }

    fn set_stencil_op(&mut self, fail: StencilOp, depth_fail: StencilOp, pass: StencilOp) -> Result<()> {
        self.record(Command::StencilOp { fail, depth_fail, pass })?;
        self.state.stencil.fail_op = fail;
        self.state.stencil.depth_fail_op = depth_fail;
        self.state.stencil.pass_op = pass;
        Ok(())
    }

    fn set_color_mask(&mut self, mask: ColorWriteMask) -> Result<()> {
        self.record(Command::ColorMask(mask))?;
        self.state.color_mask = mask;
        Ok(())
    }

    fn draw(&mut self, drawable: &dyn Drawable, camera: &RenderCamera) -> Result<()> {
        let record = DrawRecord {
            label: drawable.label().to_string(),
            camera: *camera,
            state: self.state,
        };
        self.record(Command::Draw(record))
    }
}

#[cfg(test)]
#[path = "mock_command_list_tests.rs"]
mod tests;
