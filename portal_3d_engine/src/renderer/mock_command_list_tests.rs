/// Unit tests for MockCommandList.

use glam::Mat4;
use crate::camera::RenderCamera;
use crate::error::Error;
use crate::renderer::{
    Capability, ClearFlags, ClearValues, ColorWriteMask, CommandList, CompareOp, Drawable, StencilOp,
};
use crate::scene::Mesh;
use super::*;

struct Named(&'static str);

impl Drawable for Named {
    fn label(&self) -> &str {
        self.0
    }

    fn visit_meshes(&self, _visitor: &mut dyn FnMut(&Mesh, &Mat4)) {}
}

fn identity_camera() -> RenderCamera {
    RenderCamera::new(Mat4::IDENTITY, Mat4::IDENTITY)
}

// ============================================================================
// Recording
// ============================================================================

#[test]
fn test_records_commands_in_order() {
    let mut cmd = MockCommandList::new();
    cmd.enable(Capability::StencilTest).unwrap();
    cmd.set_stencil_func(CompareOp::Equal, 1, 0xFF).unwrap();
    cmd.draw(&Named("scene"), &identity_camera()).unwrap();

    assert_eq!(cmd.commands.len(), 3);
    assert_eq!(cmd.commands[0], Command::Enable(Capability::StencilTest));
    assert_eq!(
        cmd.commands[1],
        Command::StencilFunc { func: CompareOp::Equal, reference: 1, compare_mask: 0xFF }
    );
    assert_eq!(cmd.draw_labels(), vec!["scene"]);
    assert_eq!(cmd.state_change_count(), 2);
}

#[test]
fn test_draw_snapshots_current_state() {
    let mut cmd = MockCommandList::new();
    cmd.set_color_mask(ColorWriteMask::NONE).unwrap();
    cmd.set_stencil_op(StencilOp::Zero, StencilOp::Zero, StencilOp::IncrementAndClamp).unwrap();
    cmd.draw(&Named("portal"), &identity_camera()).unwrap();
    cmd.set_color_mask(ColorWriteMask::ALL).unwrap();
    cmd.draw(&Named("scene"), &identity_camera()).unwrap();

    let draws = cmd.draws();
    assert_eq!(draws[0].state.color_mask, ColorWriteMask::NONE);
    assert_eq!(draws[0].state.stencil.pass_op, StencilOp::IncrementAndClamp);
    assert_eq!(draws[1].state.color_mask, ColorWriteMask::ALL);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_empty_clear_is_rejected() {
    let mut cmd = MockCommandList::new();
    let result = cmd.clear(ClearFlags::empty(), &ClearValues::default());
    assert!(matches!(result, Err(Error::BackendError(_))));
    assert!(cmd.commands.is_empty());
}

#[test]
fn test_failing_after_reports_device_lost() {
    let mut cmd = MockCommandList::failing_after(1);
    assert!(cmd.set_depth_mask(false).is_ok());

    let result = cmd.set_depth_mask(true);
    assert!(matches!(result, Err(Error::DeviceLost(_))));
    // State is not mutated by a failed call
    assert!(!cmd.state.depth_write);
}
