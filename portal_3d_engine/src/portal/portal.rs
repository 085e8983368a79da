/// Portal - a planar rectangular surface, optionally linked to a partner.
///
/// A portal faces its local +Z axis. Linked portals come in mutual pairs,
/// managed by `PortalSet` so that `a -> b` always implies `b -> a`.

use glam::{Mat4, Vec2};
use slotmap::{new_key_type, SlotMap};
use crate::engine_debug;
use crate::error::{Error, Result};
use crate::math::Pose;
use crate::renderer::Drawable;
use crate::scene::{Color, Mesh};

new_key_type! {
    /// Stable key of a portal in a `PortalSet`
    pub struct PortalKey;
}

// ===== PORTAL =====

#[derive(Debug, Clone)]
pub struct Portal {
    name: String,
    pose: Pose,
    size: Vec2,
    surface: Mesh,
    destination: Option<PortalKey>,
}

impl Portal {
    /// Create an unlinked portal of `width` x `height` with a flat color.
    pub fn new(name: impl Into<String>, width: f32, height: f32, color: Color, pose: Pose) -> Self {
        let name = name.into();
        Self {
            surface: Mesh::quad(width, height, color).with_name(name.clone()),
            name,
            pose,
            size: Vec2::new(width, height),
            destination: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// World transform of the portal surface
    pub fn world_transform(&self) -> Mat4 {
        self.pose.matrix()
    }

    /// Width and height
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn color(&self) -> Color {
        self.surface.color()
    }

    pub fn surface(&self) -> &Mesh {
        &self.surface
    }

    /// Partner key as stored. May dangle if the set was edited behind the
    /// portal's back; use `PortalSet::destination_of` for a validated key.
    pub fn destination(&self) -> Option<PortalKey> {
        self.destination
    }

    pub fn is_linked(&self) -> bool {
        self.destination.is_some()
    }
}

impl Drawable for Portal {
    fn label(&self) -> &str {
        &self.name
    }

    fn visit_meshes(&self, visitor: &mut dyn FnMut(&Mesh, &Mat4)) {
        visitor(&self.surface, &self.world_transform());
    }
}

// ===== PORTAL SET =====

/// All portals of a world, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct PortalSet {
    portals: SlotMap<PortalKey, Portal>,
    order: Vec<PortalKey>,
}

impl PortalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, portal: Portal) -> PortalKey {
        let key = self.portals.insert(Portal { destination: None, ..portal });
        self.order.push(key);
        key
    }

    /// Remove a portal, unlinking its partner. Returns the removed portal.
    pub fn remove(&mut self, key: PortalKey) -> Option<Portal> {
        let mut portal = self.portals.remove(key)?;
        self.order.retain(|&k| k != key);

        if let Some(partner) = portal.destination.take() {
            if let Some(other) = self.portals.get_mut(partner) {
                other.destination = None;
                engine_debug!("portal3d::PortalSet", "Portal '{}' unlinked (partner removed)", other.name);
            }
        }
        Some(portal)
    }

    pub fn get(&self, key: PortalKey) -> Option<&Portal> {
        self.portals.get(key)
    }

    pub fn get_mut(&mut self, key: PortalKey) -> Option<&mut Portal> {
        self.portals.get_mut(key)
    }

    /// Link two portals to each other. Previous partners of either are unlinked.
    pub fn link(&mut self, a: PortalKey, b: PortalKey) -> Result<()> {
        if a == b {
            return Err(Error::InvalidResource("A portal cannot be linked to itself".to_string()));
        }
        if !self.portals.contains_key(a) || !self.portals.contains_key(b) {
            return Err(Error::InvalidResource("Cannot link a portal that is not in the set".to_string()));
        }

        self.unlink(a);
        self.unlink(b);
        self.portals[a].destination = Some(b);
        self.portals[b].destination = Some(a);

        engine_debug!(
            "portal3d::PortalSet",
            "Linked portals '{}' <-> '{}'",
            self.portals[a].name,
            self.portals[b].name
        );
        Ok(())
    }

    /// Unlink a portal and its partner. Returns false if it was not linked.
    pub fn unlink(&mut self, key: PortalKey) -> bool {
        let Some(partner) = self.portals.get_mut(key).and_then(|p| p.destination.take()) else {
            return false;
        };
        if let Some(other) = self.portals.get_mut(partner) {
            if other.destination == Some(key) {
                other.destination = None;
            }
        }
        engine_debug!("portal3d::PortalSet", "Unlinked portal '{}'", self.portals[key].name);
        true
    }

    /// Partner of `key`, only if it still exists.
    pub fn destination_of(&self, key: PortalKey) -> Option<PortalKey> {
        self.portals
            .get(key)?
            .destination
            .filter(|partner| self.portals.contains_key(*partner))
    }

    pub fn len(&self) -> usize {
        self.portals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = PortalKey> + '_ {
        self.order.iter().copied()
    }

    /// Portals in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (PortalKey, &Portal)> {
        self.order.iter().map(|&key| (key, &self.portals[key]))
    }
}

#[cfg(test)]
#[path = "portal_tests.rs"]
mod tests;
