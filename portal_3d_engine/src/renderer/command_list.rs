/// CommandList trait - the render-state contract the portal sequencer drives
///
/// A command list is an immediate-mode state machine: every call mutates
/// one piece of fixed-function state or issues one draw, in order. The
/// portal sequencer never touches pixels; backends (the software
/// rasterizer, a GPU backend, a recording mock) own the buffers.

use glam::Mat4;
use crate::camera::RenderCamera;
use crate::error::Result;
use crate::scene::Mesh;
use super::render_state::{
    Capability, ClearFlags, ClearValues, ColorWriteMask, CompareOp, CullMode, StencilOp,
};

/// Something that can be drawn: a set of meshes with world transforms.
///
/// Implemented by the scene (all objects) and by portals (their surface).
pub trait Drawable {
    /// Short name used in logs and traces
    fn label(&self) -> &str;

    /// Visit every mesh with its world transform
    fn visit_meshes(&self, visitor: &mut dyn FnMut(&Mesh, &Mat4));
}

/// Command list for issuing masked/tested draws and buffer clears
///
/// Every method returns `Result`; a backend that lost its context returns
/// `Error::DeviceLost` and the frame is abandoned.
pub trait CommandList: Send + Sync {
    /// Clear the selected buffers
    ///
    /// Clears honour the current write masks: color writes, the depth
    /// write mask and the stencil write mask.
    ///
    /// # Arguments
    ///
    /// * `flags` - Buffers to clear
    /// * `values` - Values written to each cleared buffer
    fn clear(&mut self, flags: ClearFlags, values: &ClearValues) -> Result<()>;

    /// Enable a fixed-function stage
    fn enable(&mut self, capability: Capability) -> Result<()>;

    /// Disable a fixed-function stage
    fn disable(&mut self, capability: Capability) -> Result<()>;

    /// Select which faces are culled while `Capability::CullFace` is enabled
    fn set_cull_mode(&mut self, mode: CullMode) -> Result<()>;

    /// Set the depth comparison (`incoming OP stored`)
    fn set_depth_func(&mut self, func: CompareOp) -> Result<()>;

    /// Enable or disable depth writes
    fn set_depth_mask(&mut self, enabled: bool) -> Result<()>;

    /// Set the stencil comparison
    ///
    /// # Arguments
    ///
    /// * `func` - Operator, evaluated as `(reference & mask) OP (stored & mask)`
    /// * `reference` - Reference value
    /// * `compare_mask` - Bits read for the comparison
    fn set_stencil_func(&mut self, func: CompareOp, reference: u32, compare_mask: u32) -> Result<()>;

    /// Set the stencil write mask (also applies to stencil clears)
    fn set_stencil_mask(&mut self, write_mask: u32) -> Result<()>;

    /// Set the stencil operations
    ///
    /// # Arguments
    ///
    /// * `fail` - Stencil test failed
    /// * `depth_fail` - Stencil test passed, depth test failed
    /// * `pass` - Both tests passed (or depth test disabled)
    fn set_stencil_op(&mut self, fail: StencilOp, depth_fail: StencilOp, pass: StencilOp) -> Result<()>;

    /// Set the color write mask
    fn set_color_mask(&mut self, mask: ColorWriteMask) -> Result<()>;

    /// Draw a drawable through a camera with the current state
    fn draw(&mut self, drawable: &dyn Drawable, camera: &RenderCamera) -> Result<()>;
}
