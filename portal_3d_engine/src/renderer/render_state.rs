/// Render state - fixed-function depth/stencil/color/cull state.
///
/// Values mirror the OpenGL state machine: a `CommandList` mutates one
/// piece of state per call and every draw uses whatever is current.
/// `RenderState::default()` is the OpenGL initial state.

use bitflags::bitflags;

// ===== CAPABILITIES =====

/// Toggleable fixed-function stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Depth test (also gates depth writes)
    DepthTest,
    /// Stencil test
    StencilTest,
    /// Face culling
    CullFace,
}

bitflags! {
    /// Buffers affected by `CommandList::clear`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u8 {
        const COLOR   = 0b0000_0001;
        const DEPTH   = 0b0000_0010;
        const STENCIL = 0b0000_0100;
    }
}

/// Values written by a clear
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearValues {
    /// RGBA in [0, 1]
    pub color: [f32; 4],
    pub depth: f32,
    pub stencil: u32,
}

impl Default for ClearValues {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0, 1.0],
            depth: 1.0,
            stencil: 0,
        }
    }
}

// ===== RASTERIZATION ENUMS =====

/// Face culling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    /// Cull front faces
    Front,
    /// Cull back faces
    Back,
    /// Cull everything
    FrontAndBack,
}

// ===== DEPTH/STENCIL ENUMS =====

/// Comparison operator for depth and stencil tests
///
/// Evaluated as `incoming OP stored` for depth and as
/// `(reference & mask) OP (stored & mask)` for stencil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Never pass
    Never,
    /// Pass if incoming < stored
    Less,
    /// Pass if incoming == stored
    Equal,
    /// Pass if incoming <= stored
    LessOrEqual,
    /// Pass if incoming > stored
    Greater,
    /// Pass if incoming != stored
    NotEqual,
    /// Pass if incoming >= stored
    GreaterOrEqual,
    /// Always pass
    Always,
}

impl CompareOp {
    /// Evaluate `incoming OP stored`.
    pub fn test<T: PartialOrd>(self, incoming: T, stored: T) -> bool {
        match self {
            CompareOp::Never => false,
            CompareOp::Less => incoming < stored,
            CompareOp::Equal => incoming == stored,
            CompareOp::LessOrEqual => incoming <= stored,
            CompareOp::Greater => incoming > stored,
            CompareOp::NotEqual => incoming != stored,
            CompareOp::GreaterOrEqual => incoming >= stored,
            CompareOp::Always => true,
        }
    }
}

/// Stencil operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilOp {
    /// Keep current value
    Keep,
    /// Set to zero
    Zero,
    /// Replace with reference value
    Replace,
    /// Increment and clamp to max
    IncrementAndClamp,
    /// Decrement and clamp to zero
    DecrementAndClamp,
    /// Bitwise invert
    Invert,
    /// Increment and wrap around
    IncrementAndWrap,
    /// Decrement and wrap around
    DecrementAndWrap,
}

impl StencilOp {
    /// New stencil value for `current`, before the write mask is applied.
    /// `max` is the largest representable value (255 for an 8-bit buffer).
    pub fn apply(self, current: u32, reference: u32, max: u32) -> u32 {
        match self {
            StencilOp::Keep => current,
            StencilOp::Zero => 0,
            StencilOp::Replace => reference & max,
            StencilOp::IncrementAndClamp => current.saturating_add(1).min(max),
            StencilOp::DecrementAndClamp => current.saturating_sub(1),
            StencilOp::Invert => !current & max,
            StencilOp::IncrementAndWrap => if current >= max { 0 } else { current + 1 },
            StencilOp::DecrementAndWrap => if current == 0 { max } else { current - 1 },
        }
    }
}

// ===== COLOR WRITE MASK =====

/// Color write mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorWriteMask {
    pub r: bool,
    pub g: bool,
    pub b: bool,
    pub a: bool,
}

impl ColorWriteMask {
    /// All channels enabled
    pub const ALL: Self = Self { r: true, g: true, b: true, a: true };
    /// No channels enabled
    pub const NONE: Self = Self { r: false, g: false, b: false, a: false };

    /// True when at least one channel is writable
    pub fn any(&self) -> bool {
        self.r || self.g || self.b || self.a
    }
}

impl Default for ColorWriteMask {
    fn default() -> Self {
        Self::ALL
    }
}

// ===== STATE SNAPSHOT =====

/// Stencil function, masks and operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StencilState {
    /// Comparison operator
    pub func: CompareOp,
    /// Reference value for compare/replace
    pub reference: u32,
    /// Bits of reference and stored value read for compare
    pub compare_mask: u32,
    /// Bits of the stencil buffer written
    pub write_mask: u32,
    /// Action on stencil test fail
    pub fail_op: StencilOp,
    /// Action on stencil pass + depth fail
    pub depth_fail_op: StencilOp,
    /// Action on stencil pass + depth pass
    pub pass_op: StencilOp,
}

impl Default for StencilState {
    fn default() -> Self {
        Self {
            func: CompareOp::Always,
            reference: 0,
            compare_mask: u32::MAX,
            write_mask: u32::MAX,
            fail_op: StencilOp::Keep,
            depth_fail_op: StencilOp::Keep,
            pass_op: StencilOp::Keep,
        }
    }
}

/// Complete fixed-function state seen by a draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub depth_test: bool,
    /// Depth writes; only effective while the depth test is enabled
    pub depth_write: bool,
    pub depth_func: CompareOp,
    pub stencil_test: bool,
    pub stencil: StencilState,
    pub cull_face: bool,
    pub cull_mode: CullMode,
    pub color_mask: ColorWriteMask,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            depth_test: false,
            depth_write: true,
            depth_func: CompareOp::Less,
            stencil_test: false,
            stencil: StencilState::default(),
            cull_face: false,
            cull_mode: CullMode::Back,
            color_mask: ColorWriteMask::ALL,
        }
    }
}

impl RenderState {
    /// Toggle a capability
    pub fn set_capability(&mut self, capability: Capability, enabled: bool) {
        match capability {
            Capability::DepthTest => self.depth_test = enabled,
            Capability::StencilTest => self.stencil_test = enabled,
            Capability::CullFace => self.cull_face = enabled,
        }
    }

    /// Current value of a capability
    pub fn is_enabled(&self, capability: Capability) -> bool {
        match capability {
            Capability::DepthTest => self.depth_test,
            Capability::StencilTest => self.stencil_test,
            Capability::CullFace => self.cull_face,
        }
    }

    /// Stencil comparison for a stored value:
    /// `(reference & mask) func (stored & mask)`. Passes when the test is off.
    pub fn stencil_passes(&self, stored: u32) -> bool {
        if !self.stencil_test {
            return true;
        }
        let mask = self.stencil.compare_mask;
        self.stencil.func.test(self.stencil.reference & mask, stored & mask)
    }

    /// Depth comparison for an incoming fragment. Passes when the test is off.
    pub fn depth_passes(&self, incoming: f32, stored: f32) -> bool {
        !self.depth_test || self.depth_func.test(incoming, stored)
    }

    /// Stencil value after a fragment's test outcome, honouring the write mask.
    pub fn stencil_after(&self, stored: u32, stencil_pass: bool, depth_pass: bool, max: u32) -> u32 {
        if !self.stencil_test {
            return stored;
        }
        let op = if !stencil_pass {
            self.stencil.fail_op
        } else if !depth_pass {
            self.stencil.depth_fail_op
        } else {
            self.stencil.pass_op
        };
        let updated = op.apply(stored, self.stencil.reference, max);
        let mask = self.stencil.write_mask & max;
        (stored & !mask) | (updated & mask)
    }
}

#[cfg(test)]
#[path = "render_state_tests.rs"]
mod tests;
