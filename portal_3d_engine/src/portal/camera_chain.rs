/// Camera chain - per-level virtual cameras for recursive portal views.
///
/// Looking through a source portal S toward its destination D, level 0 is
/// the real camera carried once through the link, level 1 is level 0
/// carried through again, and so on. Each level's projection is oblique,
/// with the portal plane as near plane.
///
/// Chains are rebuilt every frame into freshly owned vectors.

use glam::Mat4;
use crate::camera::{PerspectiveCamera, RenderCamera};
use crate::engine_trace;
use crate::math::{portal_clip_plane, try_oblique_projection, virtual_camera_transform};
use super::portal::{PortalKey, PortalSet};

/// One recursion level's complete camera state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainEntry {
    /// World transform of the virtual camera
    pub model: Mat4,
    /// View of the previous level (the real camera for level 0); the clip
    /// plane is derived in this space
    pub view: Mat4,
    /// Oblique projection for this level
    pub projection: Mat4,
}

impl ChainEntry {
    /// The camera draws at this level are issued with.
    pub fn render_camera(&self) -> RenderCamera {
        RenderCamera::new(self.model.inverse(), self.projection)
    }
}

/// Per-chain build statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainStats {
    pub levels: usize,
    /// Levels that kept the unmodified projection (degenerate clip plane)
    pub oblique_fallbacks: usize,
}

/// Ordered camera levels; index 0 is the first bounce.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraChain {
    entries: Vec<ChainEntry>,
    stats: ChainStats,
}

impl CameraChain {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a built chain, which always holds at least one level.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, level: usize) -> Option<&ChainEntry> {
        self.entries.get(level)
    }

    /// Level 0
    pub fn base(&self) -> Option<&ChainEntry> {
        self.entries.first()
    }

    /// Deepest level
    pub fn deepest(&self) -> Option<&ChainEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChainEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    /// Recursion depth the chain was built for (`len - 1`)
    pub fn max_depth(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    pub fn stats(&self) -> ChainStats {
        self.stats
    }
}

/// Build the camera chain for viewing through `source` toward `destination`.
///
/// Produces exactly `max_depth + 1` levels:
/// - level 0: `model = D * R * S⁻¹ * camera.world`, clip plane from the real view
/// - level i: `model = D * R * S⁻¹ * model[i-1]`, clip plane from `model[i-1]⁻¹`
pub fn build_chain(
    source: &Mat4,
    destination: &Mat4,
    camera: &PerspectiveCamera,
    max_depth: usize,
) -> CameraChain {
    let base_projection = camera.projection_matrix();
    let mut entries = Vec::with_capacity(max_depth + 1);
    let mut stats = ChainStats::default();

    let mut previous_model = camera.world_transform();
    let mut view = camera.view_matrix();

    for level in 0..=max_depth {
        if level > 0 {
            view = previous_model.inverse();
        }
        let model = virtual_camera_transform(destination, source, &previous_model);
        let clip_plane = portal_clip_plane(source, &view);

        let projection = match try_oblique_projection(clip_plane, &base_projection) {
            Some(projection) => projection,
            None => {
                stats.oblique_fallbacks += 1;
                engine_trace!(
                    "portal3d::CameraChain",
                    "Level {}: degenerate clip plane {:?}, keeping base projection",
                    level,
                    clip_plane
                );
                base_projection
            }
        };

        entries.push(ChainEntry { model, view, projection });
        previous_model = model;
    }

    stats.levels = entries.len();
    CameraChain { entries, stats }
}

// ===== RENDER DATA =====

/// One linked portal's chain, as if looking through it toward its partner.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalRenderData {
    pub portal: PortalKey,
    pub destination: PortalKey,
    pub chain: CameraChain,
}

/// Build one chain per linked portal, in portal-set order.
///
/// Unlinked portals (no destination, or a destination that no longer
/// exists) are skipped.
pub fn build_render_data(
    portals: &PortalSet,
    camera: &PerspectiveCamera,
    max_depth: usize,
) -> Vec<PortalRenderData> {
    portals
        .iter()
        .filter_map(|(key, portal)| {
            let destination = portals.destination_of(key)?;
            let partner = portals.get(destination)?;
            let chain = build_chain(&portal.world_transform(), &partner.world_transform(), camera, max_depth);

            let stats = chain.stats();
            engine_trace!(
                "portal3d::CameraChain",
                "'{}' -> '{}': {} levels, {} oblique fallbacks",
                portal.name(),
                partner.name(),
                stats.levels,
                stats.oblique_fallbacks
            );
            Some(PortalRenderData { portal: key, destination, chain })
        })
        .collect()
}

#[cfg(test)]
#[path = "camera_chain_tests.rs"]
mod tests;
