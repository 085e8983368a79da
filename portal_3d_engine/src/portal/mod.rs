//! Portal module
//!
//! Portals and their links, the per-portal camera chains, and the stencil
//! sequencer that renders them.

mod portal;
mod camera_chain;
mod portal_renderer;

pub use portal::{Portal, PortalKey, PortalSet};
pub use camera_chain::{
    build_chain, build_render_data, CameraChain, ChainEntry, ChainStats, PortalRenderData,
};
pub use portal_renderer::{FrameStats, PortalFrame, PortalRenderer};
