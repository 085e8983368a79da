/*!
# Portal 3D Engine - Software Renderer Backend

CPU implementation of the portal engine's `CommandList`.

Renders into an in-memory framebuffer (RGBA8 color, f32 depth, 8-bit
stencil) with OpenGL stencil/depth/color-mask semantics. Used as the
reference backend for the demo and for full-frame tests.

```no_run
use portal_3d_engine_renderer_soft::SoftwareCommandList;

let mut cmd = SoftwareCommandList::new(320, 240)?;
// world.render(&mut cmd)?;
let rgba: &[u8] = cmd.framebuffer().color_bytes();
# Ok::<(), portal_3d_engine::portal3d::Error>(())
```
*/

mod framebuffer;
mod rasterizer;
mod software_command_list;
mod stats;

pub use framebuffer::{to_rgba8, Framebuffer, STENCIL_MAX};
pub use software_command_list::SoftwareCommandList;
pub use stats::RendererStats;
