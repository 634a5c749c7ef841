//! Transient status message shown briefly over the board.
//!
//! Capacity rejections and similar user-facing notices land here; the
//! message self-clears after [`STATUS_DISMISS_SECS`]. The timer is not
//! cancellable — a new message simply restarts it.

use bevy::prelude::*;

/// How long a status message stays on screen, in seconds.
pub const STATUS_DISMISS_SECS: f32 = 1.6;

/// Status message shown briefly on screen.
#[derive(Resource, Default)]
pub struct StatusMessage {
    pub text: String,
    pub timer: f32,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn set(&mut self, text: impl Into<String>, is_error: bool) {
        self.text = text.into();
        self.timer = STATUS_DISMISS_SECS;
        self.is_error = is_error;
    }

    pub fn active(&self) -> bool {
        self.timer > 0.0
    }
}

pub fn tick_status_message(time: Res<Time>, mut status: ResMut<StatusMessage>) {
    if status.timer > 0.0 {
        status.timer -= time.delta_secs();
    }
}
