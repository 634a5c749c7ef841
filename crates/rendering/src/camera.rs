//! Pan/zoom transform controller for the board viewport.
//!
//! [`BoardCamera`] holds the live transform in board-pixel space: a point
//! `p` on the board appears at screen position `p * scale + offset`. Input
//! systems and programmatic operations write to [`CameraTarget`]; the
//! smoothing system animates `BoardCamera` toward it each frame (see
//! `camera_smoothing`). The offset is unconstrained — the board may be
//! panned arbitrarily far off-screen.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use board::drag::DragState;

use crate::input::PressState;
use crate::layout::BoardBounds;

/// Scale bounds. The fit computation clamps into this range; callers of
/// `set_transform` pre-clamp — the controller itself never clamps silently.
pub const MIN_SCALE: f32 = 0.3;
pub const MAX_SCALE: f32 = 3.0;

/// Margin around the content when fitting, so enclosures are never flush
/// with the viewport edge.
pub const FIT_MARGIN: f32 = 24.0;

/// Zoom step per scroll-wheel line.
pub const WHEEL_ZOOM_STEP: f32 = 0.1;

/// Zoom step of the toolbar buttons.
pub const BUTTON_ZOOM_STEP: f32 = 0.2;

/// The live viewport transform.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct BoardCamera {
    /// Screen-space pan offset in pixels.
    pub offset: Vec2,
    /// Zoom factor, kept within `[MIN_SCALE, MAX_SCALE]` by all callers.
    pub scale: f32,
}

impl Default for BoardCamera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

/// The desired viewport transform that input systems and programmatic
/// operations write to. The smoothing system bridges the gap each frame.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CameraTarget {
    pub offset: Vec2,
    pub scale: f32,
}

impl Default for CameraTarget {
    fn default() -> Self {
        let camera = BoardCamera::default();
        Self {
            offset: camera.offset,
            scale: camera.scale,
        }
    }
}

impl CameraTarget {
    /// Target the given transform. The scale must already be clamped by
    /// the caller (the fit computation clamps, the zoom helpers clamp).
    pub fn set_transform(&mut self, offset: Vec2, scale: f32) {
        self.offset = offset;
        self.scale = scale;
    }

    /// Multiply the scale by `(1 + step)`, clamped.
    pub fn zoom_in(&mut self, step: f32) {
        self.scale = (self.scale * (1.0 + step)).clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Divide the scale by `(1 + step)`, clamped.
    pub fn zoom_out(&mut self, step: f32) {
        self.scale = (self.scale / (1.0 + step)).clamp(MIN_SCALE, MAX_SCALE);
    }
}

/// Tracked window size in logical pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub w: f32,
    pub h: f32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            w: 1200.0,
            h: 800.0,
        }
    }
}

/// Fit-to-content scale: the zoom that makes the whole bounding box
/// visible inside the viewport.
pub fn compute_fit(viewport: ViewportSize, bounds: &BoardBounds) -> f32 {
    let zx = (viewport.w - FIT_MARGIN) / bounds.width;
    let zy = (viewport.h - FIT_MARGIN) / bounds.height;
    zx.min(zy).clamp(MIN_SCALE, MAX_SCALE)
}

/// Offset that shows the whole board centered at the given scale.
pub fn centered_offset(viewport: ViewportSize, bounds: &BoardBounds, scale: f32) -> Vec2 {
    Vec2::new(
        (viewport.w - bounds.width * scale) * 0.5,
        (viewport.h - bounds.height * scale) * 0.5,
    )
}

/// Offset that places `target`'s center at the viewport center, shifted
/// vertically by `vertical_bias * viewport height` (negative = above
/// center).
pub fn focus_offset(target: Rect, scale: f32, viewport: ViewportSize, vertical_bias: f32) -> Vec2 {
    let center = target.center();
    Vec2::new(
        viewport.w * 0.5 - center.x * scale,
        viewport.h * 0.5 + viewport.h * vertical_bias - center.y * scale,
    )
}

pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// System: track the primary window's logical size (floored so degenerate
/// windows never produce a zero or negative fit).
pub fn update_viewport_size(windows: Query<&Window>, mut viewport: ResMut<ViewportSize>) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let w = window.width().max(200.0);
    let h = window.height().max(200.0);
    if w != viewport.w || h != viewport.h {
        viewport.w = w;
        viewport.h = h;
    }
}

/// Tracks an in-progress board pan (left-button drag on empty board).
#[derive(Resource, Default)]
pub struct PanDrag {
    pub active: bool,
    pub last_pos: Vec2,
}

/// System: left-mouse drag pans the board.
///
/// A press that landed on an occupant chip never pans — it belongs to the
/// gesture layer — and panning is suspended entirely while a chip drag is
/// active.
pub fn camera_pan_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    drag_state: Res<DragState>,
    press: Res<PressState>,
    mut pan: ResMut<PanDrag>,
    mut target: ResMut<CameraTarget>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    // Only presses the gesture layer admitted (not claimed by egui) and
    // that did not land on a chip may start a pan.
    if buttons.just_pressed(MouseButton::Left) && press.pressed && press.on_chip.is_none() {
        if let Some(pos) = window.cursor_position() {
            pan.active = true;
            pan.last_pos = pos;
        }
    }

    if buttons.just_released(MouseButton::Left) {
        pan.active = false;
    }

    if drag_state.dragging() {
        pan.active = false;
        return;
    }

    if pan.active {
        if let Some(pos) = window.cursor_position() {
            let delta = pos - pan.last_pos;
            if delta != Vec2::ZERO {
                target.offset += delta;
                pan.last_pos = pos;
            }
        }
    }
}

/// System: scroll wheel zooms by [`WHEEL_ZOOM_STEP`] per line.
pub fn camera_zoom_wheel(
    mut scroll_evts: EventReader<MouseWheel>,
    mut target: ResMut<CameraTarget>,
) {
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        if dy > 0.0 {
            target.zoom_in(WHEEL_ZOOM_STEP * dy);
        } else if dy < 0.0 {
            target.zoom_out(WHEEL_ZOOM_STEP * -dy);
        }
    }
}

/// System: on entering the ready state, frame the whole board (fit scale,
/// centered) as an instant teleport rather than an animation.
pub fn fit_on_ready(
    viewport: Res<ViewportSize>,
    bounds: Res<BoardBounds>,
    mut camera: ResMut<BoardCamera>,
    mut target: ResMut<CameraTarget>,
) {
    let fit = compute_fit(*viewport, &bounds);
    let offset = centered_offset(*viewport, &bounds, fit);
    camera.offset = offset;
    camera.scale = fit;
    target.set_transform(offset, fit);
}

/// System: apply [`BoardCamera`] to the 2D camera each frame.
///
/// Board space is y-down with its origin at the top-left of the bounding
/// box; world space is y-up, so board content is spawned at `(x, -y)` and
/// the camera is positioned over the board point that sits under the
/// viewport center.
pub fn apply_board_camera(
    camera: Res<BoardCamera>,
    viewport: Res<ViewportSize>,
    mut query: Query<(&mut Transform, &mut OrthographicProjection), With<Camera2d>>,
) {
    if !camera.is_changed() && !viewport.is_changed() {
        return;
    }
    let Ok((mut transform, mut projection)) = query.get_single_mut() else {
        return;
    };
    let center_x = (viewport.w * 0.5 - camera.offset.x) / camera.scale;
    let center_y = (viewport.h * 0.5 - camera.offset.y) / camera.scale;
    transform.translation.x = center_x;
    transform.translation.y = -center_y;
    projection.scale = 1.0 / camera.scale;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(width: f32, height: f32) -> BoardBounds {
        BoardBounds {
            min_x: 0.0,
            min_y: 0.0,
            width,
            height,
        }
    }

    #[test]
    fn test_compute_fit_picks_limiting_axis() {
        let viewport = ViewportSize { w: 1200.0, h: 800.0 };
        let fit = compute_fit(viewport, &bounds(2000.0, 1000.0));
        // zx = 1176/2000 = 0.588, zy = 776/1000 = 0.776
        assert!((fit - 0.588).abs() < 1e-3, "got {fit}");
    }

    #[test]
    fn test_compute_fit_clamps_to_scale_bounds() {
        let viewport = ViewportSize { w: 1200.0, h: 800.0 };
        assert_eq!(compute_fit(viewport, &bounds(10.0, 10.0)), MAX_SCALE);
        assert_eq!(compute_fit(viewport, &bounds(100_000.0, 100.0)), MIN_SCALE);
    }

    #[test]
    fn test_zoom_helpers_clamp() {
        let mut target = CameraTarget::default();
        for _ in 0..50 {
            target.zoom_in(BUTTON_ZOOM_STEP);
        }
        assert_eq!(target.scale, MAX_SCALE);
        for _ in 0..50 {
            target.zoom_out(BUTTON_ZOOM_STEP);
        }
        assert_eq!(target.scale, MIN_SCALE);
    }

    #[test]
    fn test_zoom_round_trip_is_symmetric() {
        let mut target = CameraTarget::default();
        target.zoom_in(BUTTON_ZOOM_STEP);
        target.zoom_out(BUTTON_ZOOM_STEP);
        assert!((target.scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_centered_offset_centers_content() {
        let viewport = ViewportSize { w: 1200.0, h: 800.0 };
        let offset = centered_offset(viewport, &bounds(1000.0, 600.0), 1.0);
        assert_eq!(offset, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_focus_offset_places_center_with_bias() {
        let viewport = ViewportSize { w: 1000.0, h: 800.0 };
        let target = Rect::new(90.0, 190.0, 110.0, 210.0); // center (100, 200)
        let offset = focus_offset(target, 1.0, viewport, -0.3);
        // Screen position of the target center: center * scale + offset.
        let screen = Vec2::new(100.0, 200.0) + offset;
        assert_eq!(screen.x, 500.0);
        assert_eq!(screen.y, 400.0 - 240.0);
    }

    #[test]
    fn test_focus_offset_respects_scale() {
        let viewport = ViewportSize { w: 1000.0, h: 800.0 };
        let target = Rect::new(90.0, 190.0, 110.0, 210.0);
        let offset = focus_offset(target, 2.0, viewport, 0.0);
        let screen = Vec2::new(100.0, 200.0) * 2.0 + offset;
        assert_eq!(screen, Vec2::new(500.0, 400.0));
    }
}
