use glam::{Mat4, Vec2, Vec3};
use crate::error::Error;
use crate::math::Pose;
use crate::renderer::Drawable;
use crate::scene::rgb8;
use super::*;

fn portal(name: &str, x: f32) -> Portal {
    Portal::new(name, 8.0, 8.0, rgb8(0, 0, 255), Pose::from_translation(Vec3::new(x, 7.0, -3.0)))
}

fn three_portals() -> (PortalSet, PortalKey, PortalKey, PortalKey) {
    let mut set = PortalSet::new();
    let a = set.add(portal("a", -5.0));
    let b = set.add(portal("b", 2.0));
    let c = set.add(portal("c", 9.0));
    (set, a, b, c)
}

// ============================================================================
// Portal
// ============================================================================

#[test]
fn test_portal_surface() {
    let p = portal("blue", -5.0);
    assert_eq!(p.name(), "blue");
    assert_eq!(p.size(), Vec2::new(8.0, 8.0));
    assert_eq!(p.color(), rgb8(0, 0, 255));
    assert_eq!(p.surface().triangle_count(), 2);
    assert!(!p.is_linked());
    assert_eq!(p.world_transform(), Mat4::from_translation(Vec3::new(-5.0, 7.0, -3.0)));
}

#[test]
fn test_portal_drawable_visits_surface_once() {
    let p = portal("blue", -5.0);
    let mut visits = Vec::new();
    p.visit_meshes(&mut |mesh, transform| visits.push((mesh.name().to_string(), *transform)));

    assert_eq!(p.label(), "blue");
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].0, "blue");
    assert_eq!(visits[0].1, p.world_transform());
}

#[test]
fn test_set_pose() {
    let mut p = portal("orange", 2.0);
    p.pose_mut().position.y = 1.0;
    assert_eq!(p.pose().position, Vec3::new(2.0, 1.0, -3.0));
    p.set_pose(Pose::IDENTITY);
    assert_eq!(p.world_transform(), Mat4::IDENTITY);
}

// ============================================================================
// Linking
// ============================================================================

#[test]
fn test_link_is_mutual() {
    let (mut set, a, b, _) = three_portals();
    set.link(a, b).unwrap();

    assert_eq!(set.destination_of(a), Some(b));
    assert_eq!(set.destination_of(b), Some(a));
    assert!(set.get(a).unwrap().is_linked());
}

#[test]
fn test_relink_unlinks_previous_partner() {
    let (mut set, a, b, c) = three_portals();
    set.link(a, b).unwrap();
    set.link(a, c).unwrap();

    assert_eq!(set.destination_of(a), Some(c));
    assert_eq!(set.destination_of(c), Some(a));
    assert_eq!(set.destination_of(b), None);
}

#[test]
fn test_link_to_self_is_rejected() {
    let (mut set, a, _, _) = three_portals();
    assert!(matches!(set.link(a, a), Err(Error::InvalidResource(_))));
    assert_eq!(set.destination_of(a), None);
}

#[test]
fn test_link_to_missing_is_rejected() {
    let (mut set, a, b, _) = three_portals();
    set.remove(b);
    assert!(matches!(set.link(a, b), Err(Error::InvalidResource(_))));
}

#[test]
fn test_unlink() {
    let (mut set, a, b, _) = three_portals();
    set.link(a, b).unwrap();

    assert!(set.unlink(b));
    assert_eq!(set.destination_of(a), None);
    assert_eq!(set.destination_of(b), None);
    assert!(!set.unlink(a));
}

#[test]
fn test_remove_unlinks_partner() {
    let (mut set, a, b, _) = three_portals();
    set.link(a, b).unwrap();

    let removed = set.remove(a).unwrap();
    assert_eq!(removed.name(), "a");
    assert_eq!(set.destination_of(b), None);
    assert!(!set.get(b).unwrap().is_linked());
    assert!(set.remove(a).is_none());
}

#[test]
fn test_added_portal_starts_unlinked() {
    let (mut set, a, b, _) = three_portals();
    set.link(a, b).unwrap();

    // A clone of a linked portal does not carry the link into the set
    let copy = set.get(a).unwrap().clone();
    let d = set.add(copy);
    assert_eq!(set.destination_of(d), None);
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_iteration_follows_insertion_order() {
    let (mut set, a, b, c) = three_portals();
    assert_eq!(set.keys().collect::<Vec<_>>(), vec![a, b, c]);

    set.remove(a);
    let d = set.add(portal("d", 0.0));
    let names: Vec<&str> = set.iter().map(|(_, p)| p.name()).collect();
    assert_eq!(names, vec!["b", "c", "d"]);
    assert_eq!(set.keys().last(), Some(d));
    assert_eq!(set.len(), 3);
}
