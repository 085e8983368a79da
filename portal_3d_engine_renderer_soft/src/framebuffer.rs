/// Framebuffer - CPU color/depth/stencil storage
///
/// Row-major, row 0 at the top. Color is RGBA8, depth is f32 in [0, 1]
/// (1.0 = far), stencil is 8 bits.

use portal_3d_engine::portal3d::render::{ClearFlags, ClearValues, ColorWriteMask, RenderState};
use portal_3d_engine::portal3d::{Error, Result};

/// Largest value an 8-bit stencil buffer holds
pub const STENCIL_MAX: u32 = 0xFF;

pub struct Framebuffer {
    width: u32,
    height: u32,
    color: Vec<[u8; 4]>,
    depth: Vec<f32>,
    stencil: Vec<u8>,
}

impl Framebuffer {
    /// Create a framebuffer cleared to transparent black, depth 1.0, stencil 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "Framebuffer size must be non-zero, got {}x{}",
                width, height
            )));
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            color: vec![[0; 4]; len],
            depth: vec![1.0; len],
            stencil: vec![0; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Clear the selected buffers through the current write masks.
    pub fn clear(&mut self, flags: ClearFlags, values: &ClearValues, state: &RenderState) {
        if flags.contains(ClearFlags::COLOR) && state.color_mask.any() {
            let rgba = to_rgba8(values.color);
            let mask = state.color_mask;
            for pixel in &mut self.color {
                write_color(pixel, rgba, mask);
            }
        }

        if flags.contains(ClearFlags::DEPTH) && state.depth_write {
            self.depth.fill(values.depth.clamp(0.0, 1.0));
        }

        if flags.contains(ClearFlags::STENCIL) {
            let mask = (state.stencil.write_mask & STENCIL_MAX) as u8;
            let value = (values.stencil & STENCIL_MAX) as u8;
            if mask == 0xFF {
                self.stencil.fill(value);
            } else if mask != 0 {
                for stored in &mut self.stencil {
                    *stored = (*stored & !mask) | (value & mask);
                }
            }
        }
    }

    pub fn color_at(&self, x: u32, y: u32) -> [u8; 4] {
        self.color[self.index(x, y)]
    }

    pub fn depth_at(&self, x: u32, y: u32) -> f32 {
        self.depth[self.index(x, y)]
    }

    pub fn stencil_at(&self, x: u32, y: u32) -> u8 {
        self.stencil[self.index(x, y)]
    }

    /// Color buffer as tightly packed RGBA8 bytes
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color)
    }

    pub fn depth_values(&self) -> &[f32] {
        &self.depth
    }

    pub fn stencil_values(&self) -> &[u8] {
        &self.stencil
    }

    pub(crate) fn color_mut(&mut self) -> &mut [[u8; 4]] {
        &mut self.color
    }

    pub(crate) fn depth_mut(&mut self) -> &mut [f32] {
        &mut self.depth
    }

    pub(crate) fn stencil_mut(&mut self) -> &mut [u8] {
        &mut self.stencil
    }
}

/// Convert a float RGBA color to RGBA8 (clamped, rounded).
pub fn to_rgba8(color: [f32; 4]) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

#[inline]
pub(crate) fn write_color(pixel: &mut [u8; 4], rgba: [u8; 4], mask: ColorWriteMask) {
    if mask.r {
        pixel[0] = rgba[0];
    }
    if mask.g {
        pixel[1] = rgba[1];
    }
    if mask.b {
        pixel[2] = rgba[2];
    }
    if mask.a {
        pixel[3] = rgba[3];
    }
}

#[cfg(test)]
#[path = "framebuffer_tests.rs"]
mod tests;
