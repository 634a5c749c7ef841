//! Camera smoothing via exponential interpolation (lerp).
//!
//! Input systems and programmatic operations write to `CameraTarget` (the
//! desired transform). Each frame, `smooth_camera_to_target` lerps
//! `BoardCamera` toward `CameraTarget` using frame-rate independent
//! exponential interpolation:
//!
//!   `value += (target - value) * (1 - exp(-speed * dt))`
//!
//! Systems that write `BoardCamera` directly (the fit-on-load teleport)
//! are detected by comparing against the last smoothed values, and
//! `CameraTarget` is synced to match, treating those writes as instant
//! teleports.

use bevy::prelude::*;

use crate::camera::{BoardCamera, CameraTarget};

/// Configurable smoothing parameters.
#[derive(Resource)]
pub struct CameraSmoothingConfig {
    /// Smoothing speed for the pan offset (higher = snappier).
    pub pan_speed: f32,
    /// Smoothing speed for the zoom scale.
    pub zoom_speed: f32,
    /// Convergence threshold — snap to the target below this difference.
    pub epsilon: f32,
}

impl Default for CameraSmoothingConfig {
    fn default() -> Self {
        Self {
            pan_speed: 10.0,
            zoom_speed: 10.0,
            epsilon: 0.001,
        }
    }
}

/// The values this module last wrote to `BoardCamera`, used to detect
/// external modifications by systems that don't know about smoothing.
#[derive(Resource)]
pub struct LastSmoothedState {
    pub offset: Vec2,
    pub scale: f32,
}

impl Default for LastSmoothedState {
    fn default() -> Self {
        let camera = BoardCamera::default();
        Self {
            offset: camera.offset,
            scale: camera.scale,
        }
    }
}

/// Exponential interpolation factor for a given speed and delta time.
#[inline]
fn exp_lerp_factor(speed: f32, dt: f32) -> f32 {
    1.0 - (-speed * dt).exp()
}

/// One smoothing step: move `camera` toward `target` for a frame of `dt`
/// seconds, snapping when within epsilon.
pub(crate) fn smooth_step(
    camera: &mut BoardCamera,
    target: &CameraTarget,
    config: &CameraSmoothingConfig,
    dt: f32,
) {
    let pan_factor = exp_lerp_factor(config.pan_speed, dt);
    let zoom_factor = exp_lerp_factor(config.zoom_speed, dt);
    let eps = config.epsilon;

    let offset_delta = target.offset - camera.offset;
    if offset_delta.length_squared() > eps * eps {
        camera.offset += offset_delta * pan_factor;
    } else if offset_delta != Vec2::ZERO {
        camera.offset = target.offset;
    }

    let scale_delta = target.scale - camera.scale;
    if scale_delta.abs() > eps {
        camera.scale += scale_delta * zoom_factor;
    } else if scale_delta != 0.0 {
        camera.scale = target.scale;
    }
}

/// System: detect external writes to `BoardCamera` and sync `CameraTarget`.
///
/// Must run before `smooth_camera_to_target` and after any system that may
/// write `BoardCamera` directly.
pub fn sync_target_from_external_changes(
    camera: Res<BoardCamera>,
    mut target: ResMut<CameraTarget>,
    mut last: ResMut<LastSmoothedState>,
) {
    let offset_changed = (camera.offset - last.offset).length_squared() > 0.0001;
    let scale_changed = (camera.scale - last.scale).abs() > 0.0001;

    if offset_changed {
        target.offset = camera.offset;
        last.offset = camera.offset;
    }
    if scale_changed {
        target.scale = camera.scale;
        last.scale = camera.scale;
    }
}

/// System: lerp `BoardCamera` toward `CameraTarget` each frame.
pub fn smooth_camera_to_target(
    target: Res<CameraTarget>,
    config: Res<CameraSmoothingConfig>,
    time: Res<Time>,
    mut camera: ResMut<BoardCamera>,
    mut last: ResMut<LastSmoothedState>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    if camera.offset != target.offset || camera.scale != target.scale {
        smooth_step(&mut camera, &target, &config, dt);
    }
    last.offset = camera.offset;
    last.scale = camera.scale;
}
