use bevy::prelude::*;

use board::app_state::BoardState;

pub mod board_render;
pub mod camera;
pub mod camera_smoothing;
pub mod focus;
pub mod input;
pub mod layout;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<camera::BoardCamera>()
            .init_resource::<camera::CameraTarget>()
            .init_resource::<camera::ViewportSize>()
            .init_resource::<camera::PanDrag>()
            .init_resource::<camera_smoothing::CameraSmoothingConfig>()
            .init_resource::<camera_smoothing::LastSmoothedState>()
            .init_resource::<layout::BoardBounds>()
            .init_resource::<board_render::ChipIndex>()
            .init_resource::<input::PressState>()
            .init_resource::<focus::FocusWait>()
            .add_systems(Startup, camera::setup_camera)
            .add_systems(
                OnEnter(BoardState::Ready),
                (
                    layout::refresh_bounds,
                    camera::fit_on_ready,
                    board_render::rebuild_board,
                )
                    .chain(),
            )
            .add_systems(Update, camera::update_viewport_size)
            .add_systems(
                Update,
                (
                    input::emit_gestures,
                    camera::camera_pan_drag,
                    camera::camera_zoom_wheel,
                )
                    .chain()
                    .after(camera::update_viewport_size)
                    .run_if(in_state(BoardState::Ready)),
            )
            .add_systems(
                Update,
                (
                    board_render::sync_on_roster_change,
                    board_render::apply_visual_state,
                    focus::process_focus_requests,
                    focus::animate_pulse,
                )
                    .chain()
                    .run_if(in_state(BoardState::Ready)),
            )
            .add_systems(
                Update,
                (
                    camera_smoothing::sync_target_from_external_changes,
                    camera_smoothing::smooth_camera_to_target,
                    camera::apply_board_camera,
                )
                    .chain(),
            );
    }
}
