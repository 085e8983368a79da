//! Portal3D demo - renders the portal hall headlessly with the software
//! backend and optionally writes the last frame to a PNG.
//!
//! Environment: `PORTAL3D_RECURSION`, `PORTAL3D_FRAMES`, `PORTAL3D_WIDTH`,
//! `PORTAL3D_HEIGHT`, `PORTAL3D_SCREENSHOT`, `PORTAL3D_SEED`, `RUST_LOG`.

mod demo;
mod fps_controls;
mod input;
mod log_bridge;
mod settings;

use glam::Vec2;
use portal_3d_engine::portal3d::{self, FrameDriver};
use portal_3d_engine_renderer_soft::SoftwareCommandList;
use winit::keyboard::KeyCode;

use crate::demo::PortalDemo;
use crate::log_bridge::LogBridge;
use crate::settings::DemoSettings;

const FRAME_TIME: f32 = 1.0 / 60.0;

/// Frames during which the scripted mouse keeps turning the camera
const LOOK_AROUND_FRAMES: u64 = 90;
const LOOK_AROUND_DELTA: Vec2 = Vec2::new(-6.0, -3.0);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    portal3d::log::set_logger(LogBridge);

    let settings = DemoSettings::from_env();
    log::info!(
        "Portal3D demo: {}x{}, {} frames, recursion {}",
        settings.width,
        settings.height,
        settings.frames,
        settings.max_recursion
    );

    let (mut world, mut demo) = PortalDemo::build(&settings)?;
    let mut cmd = SoftwareCommandList::new(settings.width, settings.height)?;
    let mut driver = FrameDriver::new();

    for frame in 0..settings.frames {
        // Scripted input stands in for a window
        if frame == 0 {
            demo.input.press_key(KeyCode::Enter);
            demo.input.release_key(KeyCode::Enter);
        }
        if frame < LOOK_AROUND_FRAMES {
            demo.input.add_mouse_delta(LOOK_AROUND_DELTA);
        }
        if let Some(mode) = demo.input.take_mode_request() {
            driver.set_mode(mode);
        }

        driver.frame(&mut world, &mut demo, &mut cmd, FRAME_TIME)?;
    }

    if let Some(stats) = demo.last_stats() {
        log::info!(
            "Last frame: {} portals sequenced, {} unlinked, {} virtual paints, {} draw calls",
            stats.portals_sequenced,
            stats.unlinked_drawn,
            stats.virtual_paints,
            stats.draw_calls
        );
    }
    log::info!(
        "Camera at {:?}, yaw {:.3}, pitch {:.3}, orange roll {:.3}",
        demo.controls().position(),
        demo.controls().yaw(),
        demo.controls().pitch(),
        demo.roll()
    );
    cmd.stats().print_report();

    if let Some(path) = &settings.screenshot {
        let framebuffer = cmd.framebuffer();
        image::save_buffer(
            path,
            framebuffer.color_bytes(),
            framebuffer.width(),
            framebuffer.height(),
            image::ExtendedColorType::Rgba8,
        )?;
        log::info!("Screenshot written to {}", path.display());
    }

    Ok(())
}
