//! Demo environment - a gray hall with pillars and two linked portals.
//!
//! Blue portal on the left facing +X, orange portal on the right facing -X,
//! each backed by a colored frame. The orange portal slowly rolls about its
//! facing axis while the demo is active.

use glam::{Mat4, Vec3};
use portal_3d_engine::portal3d::camera::PerspectiveCamera;
use portal_3d_engine::portal3d::math::Pose;
use portal_3d_engine::portal3d::portal::{FrameStats, Portal, PortalKey, PortalSet};
use portal_3d_engine::portal3d::render::CommandList;
use portal_3d_engine::portal3d::scene::{rgb8, Color, Mesh, Scene, SceneObjectKey};
use portal_3d_engine::portal3d::{
    Error, PortalConfig, PortalWorld, Renderable, Result, Updatable,
};
use portal_3d_engine::{engine_debug, engine_info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;
use std::sync::Arc;
use crate::fps_controls::FpsControls;
use crate::input::InputSnapshot;
use crate::settings::DemoSettings;

pub const SKY: Color = [175.0 / 255.0, 175.0 / 255.0, 175.0 / 255.0, 1.0];

const BLUE_PORTAL_POSITION: Vec3 = Vec3::new(-5.0, 7.0, -3.0);
const ORANGE_PORTAL_POSITION: Vec3 = Vec3::new(2.0, 7.0, -3.0);
const BLUE_FRAME_POSITION: Vec3 = Vec3::new(-5.3, 7.0, -3.0);
const ORANGE_FRAME_POSITION: Vec3 = Vec3::new(2.3, 7.0, -3.0);
const PORTAL_SIZE: f32 = 8.0;

/// Radians per active update
pub const ORANGE_ROLL_STEP: f32 = 0.001;

pub const PILLAR_COUNT: usize = 30;
const PILLAR_LENGTH: f32 = 200.0;
const PILLAR_THICKNESS: f32 = 10.0;
const PILLAR_MIN_XZ: f32 = 10.0;
const PILLAR_MAX_XZ: f32 = 210.0;

fn blue_portal_color() -> Color {
    rgb8(0x8a, 0xc8, 0xff)
}

fn orange_portal_color() -> Color {
    rgb8(0xf7, 0xcc, 0x54)
}

/// Pillar coordinate on a half-thickness grid, pushed at least `min_xz`
/// away from zero (exact zero stays put).
pub fn pillar_coordinate(unit: f32, min_xz: f32, max_xz: f32, thickness: f32) -> f32 {
    let half_thickness = thickness * 0.5;
    let range = max_xz - min_xz;
    let snapped = (unit * range / half_thickness).floor() * half_thickness;
    let spread = snapped * 2.0 - range * 0.5;
    let sign = if spread == 0.0 { 0.0 } else { spread.signum() };
    spread + sign * min_xz
}

fn orange_pose(roll: f32) -> Pose {
    Pose::from_euler_xyz(ORANGE_PORTAL_POSITION, 0.0, PI * 1.5, roll)
}

fn orange_frame_transform(roll: f32) -> Mat4 {
    Mat4::from_translation(ORANGE_FRAME_POSITION) * Mat4::from_rotation_x(-roll)
}

/// The demo root: owns input and controls, drives a `PortalWorld`.
pub struct PortalDemo {
    pub input: InputSnapshot,
    controls: FpsControls,
    orange: PortalKey,
    orange_frame: SceneObjectKey,
    roll: f32,
    last_stats: Option<FrameStats>,
}

impl PortalDemo {
    /// Build the hall, the portals and the camera.
    pub fn build(settings: &DemoSettings) -> Result<(PortalWorld, PortalDemo)> {
        let mut rng = StdRng::seed_from_u64(settings.seed);
        let mut scene = Scene::new("hall");

        let floor = Arc::new(Mesh::quad(5000.0, 5000.0, rgb8(50, 50, 50)).with_name("floor"));
        scene.add(floor, Mat4::from_rotation_x(-PI * 0.5));
        let ceiling = Arc::new(Mesh::quad(5000.0, 5000.0, rgb8(62, 62, 62)).with_name("ceiling"));
        scene.add(ceiling, Mat4::from_translation(Vec3::new(0.0, 300.0, 0.0)) * Mat4::from_rotation_x(PI * 0.5));

        let pillar = Arc::new(
            Mesh::cuboid(Vec3::new(PILLAR_THICKNESS, PILLAR_LENGTH, PILLAR_THICKNESS), rgb8(90, 90, 90))
                .with_name("pillar"),
        );
        for _ in 0..PILLAR_COUNT {
            let x = pillar_coordinate(rng.gen::<f32>(), PILLAR_MIN_XZ, PILLAR_MAX_XZ, PILLAR_THICKNESS);
            let z = pillar_coordinate(rng.gen::<f32>(), PILLAR_MIN_XZ, PILLAR_MAX_XZ, PILLAR_THICKNESS);
            scene.add(pillar.clone(), Mat4::from_translation(Vec3::new(x, PILLAR_LENGTH * 0.5, z)));
        }

        let box_color = rgb8(120, 120, 120);
        scene.add(
            Arc::new(Mesh::cuboid(Vec3::ONE, box_color).with_name("box")),
            Mat4::from_translation(Vec3::new(-2.0, 0.5, -5.0)),
        );
        scene.add(
            Arc::new(Mesh::cuboid(Vec3::splat(0.5), box_color).with_name("small box")),
            Mat4::from_translation(Vec3::new(0.0, 0.25, -4.0)),
        );

        let frame_size = Vec3::new(0.5, PORTAL_SIZE + 1.0, PORTAL_SIZE + 1.0);
        scene.add(
            Arc::new(Mesh::cuboid(frame_size, blue_portal_color()).with_name("blue frame")),
            Mat4::from_translation(BLUE_FRAME_POSITION),
        );
        let orange_frame = scene.add(
            Arc::new(Mesh::cuboid(frame_size, orange_portal_color()).with_name("orange frame")),
            orange_frame_transform(0.0),
        );

        let mut portals = PortalSet::new();
        let blue = portals.add(Portal::new(
            "blue",
            PORTAL_SIZE,
            PORTAL_SIZE,
            blue_portal_color(),
            Pose::from_euler_xyz(BLUE_PORTAL_POSITION, 0.0, PI * 0.5, 0.0),
        ));
        let orange = portals.add(Portal::new("orange", PORTAL_SIZE, PORTAL_SIZE, orange_portal_color(), orange_pose(0.0)));
        portals.link(blue, orange)?;

        let controls = FpsControls::new(Vec3::new(0.0, 1.0, 0.0));
        let camera = PerspectiveCamera::new(80.0, settings.aspect(), 0.1, 500.0).with_pose(controls.pose());
        let config = PortalConfig::default()
            .with_max_recursion(settings.max_recursion)
            .with_clear_color(SKY);

        engine_info!(
            "portal3d::demo",
            "Hall built: {} objects ({} triangles), recursion {}",
            scene.len(),
            scene.triangle_count(),
            config.max_recursion()
        );

        let world = PortalWorld::new(scene, portals, camera, config);
        let demo = PortalDemo {
            input: InputSnapshot::new(),
            controls,
            orange,
            orange_frame,
            roll: 0.0,
            last_stats: None,
        };
        Ok((world, demo))
    }

    pub fn controls(&self) -> &FpsControls {
        &self.controls
    }

    /// Accumulated roll of the orange portal
    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn last_stats(&self) -> Option<FrameStats> {
        self.last_stats
    }
}

impl Updatable<PortalWorld> for PortalDemo {
    fn update(&mut self, world: &mut PortalWorld, dt: f32) -> Result<()> {
        self.controls.update(&mut self.input, dt);
        world.camera.set_pose(self.controls.pose());

        self.roll += ORANGE_ROLL_STEP;
        let orange = world
            .portals
            .get_mut(self.orange)
            .ok_or_else(|| Error::InvalidResource("Orange portal is gone".to_string()))?;
        orange.set_pose(orange_pose(self.roll));
        if !world.scene.set_transform(self.orange_frame, orange_frame_transform(self.roll)) {
            return Err(Error::InvalidResource("Orange portal frame is gone".to_string()));
        }
        Ok(())
    }

    fn update_idle(&mut self, _world: &mut PortalWorld, _dt: f32) -> Result<()> {
        // Pointer is free: motion is not meant for the camera
        let dropped = self.input.take_mouse_delta();
        if dropped != glam::Vec2::ZERO {
            engine_debug!("portal3d::demo", "Idle: ignoring mouse motion {:?}", dropped);
        }
        Ok(())
    }
}

impl Renderable<PortalWorld> for PortalDemo {
    fn render(&mut self, world: &mut PortalWorld, cmd: &mut dyn CommandList, _dt: f32) -> Result<()> {
        self.last_stats = Some(world.render(cmd)?);
        Ok(())
    }

    /// The last image stays on screen while idle.
    fn render_idle(&mut self, _world: &mut PortalWorld, _cmd: &mut dyn CommandList, _dt: f32) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "demo_tests.rs"]
mod tests;
