//! Search-driven focus navigation.
//!
//! A [`FocusRequest`](board::search::FocusRequest) names an occupant; the
//! navigator waits for that occupant's chip to be committed to the
//! [`ChipIndex`] (the rendering layer's readiness signal), then centers the
//! camera on it with a slight upward bias and plays a short scale pulse.
//! If the chip never appears within the frame budget — the occupant may be
//! unassigned, or gone after a reload — the navigator gives up silently;
//! that is accepted behavior, logged for observability only.

use bevy::prelude::*;

use board::search::FocusRequest;

use crate::board_render::ChipIndex;
use crate::camera::{focus_offset, BoardCamera, CameraTarget, ViewportSize};

/// The focused chip lands slightly above the screen center.
pub const FOCUS_VERTICAL_BIAS: f32 = -0.3;

/// Frames to wait for the target chip before giving up.
pub const FOCUS_WAIT_FRAMES: u32 = 120;

/// Duration of the confirmation pulse, in seconds.
pub const PULSE_SECS: f32 = 0.5;

/// Scale of the focus jump: keep the current zoom if it is near 100%,
/// otherwise snap back to 100%.
pub(crate) fn focus_scale(current: f32) -> f32 {
    if (0.9..=1.1).contains(&current) {
        current
    } else {
        1.0
    }
}

/// An armed wait for a chip to appear.
#[derive(Resource, Default)]
pub struct FocusWait {
    pub occupant_id: Option<String>,
    pub frames_left: u32,
}

/// Brief scale-pulse highlight on a focused chip.
#[derive(Component, Default)]
pub struct Pulse {
    pub elapsed: f32,
}

/// System: arm waits from focus requests and complete them once the target
/// chip is committed.
pub fn process_focus_requests(
    mut requests: EventReader<FocusRequest>,
    mut wait: ResMut<FocusWait>,
    chip_index: Res<ChipIndex>,
    viewport: Res<ViewportSize>,
    camera: Res<BoardCamera>,
    mut target: ResMut<CameraTarget>,
    mut commands: Commands,
) {
    for request in requests.read() {
        wait.occupant_id = Some(request.occupant_id.clone());
        wait.frames_left = FOCUS_WAIT_FRAMES;
    }

    let Some(occupant_id) = wait.occupant_id.clone() else {
        return;
    };

    if let Some(entry) = chip_index.get(&occupant_id) {
        let scale = focus_scale(camera.scale);
        let offset = focus_offset(entry.rect, scale, *viewport, FOCUS_VERTICAL_BIAS);
        target.set_transform(offset, scale);
        if let Some(mut chip) = commands.get_entity(entry.entity) {
            chip.insert(Pulse::default());
        }
        wait.occupant_id = None;
    } else if wait.frames_left == 0 {
        warn!("focus target {occupant_id} was never rendered; giving up");
        wait.occupant_id = None;
    } else {
        wait.frames_left -= 1;
    }
}

/// System: animate and remove pulse highlights.
pub fn animate_pulse(
    time: Res<Time>,
    mut commands: Commands,
    mut pulses: Query<(Entity, &mut Transform, &mut Pulse)>,
) {
    for (entity, mut transform, mut pulse) in &mut pulses {
        pulse.elapsed += time.delta_secs();
        let t = (pulse.elapsed / PULSE_SECS).min(1.0);
        let scale = 1.0 + 0.3 * (t * std::f32::consts::PI).sin();
        transform.scale = Vec3::splat(scale);
        if t >= 1.0 {
            transform.scale = Vec3::ONE;
            commands.entity(entity).remove::<Pulse>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_scale_keeps_near_unity_zoom() {
        assert_eq!(focus_scale(1.0), 1.0);
        assert_eq!(focus_scale(0.95), 0.95);
        assert_eq!(focus_scale(1.1), 1.1);
    }

    #[test]
    fn test_focus_scale_resets_when_far_from_unity() {
        assert_eq!(focus_scale(0.3), 1.0);
        assert_eq!(focus_scale(3.0), 1.0);
        assert_eq!(focus_scale(0.89), 1.0);
    }
}
