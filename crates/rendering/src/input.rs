//! Cursor hit testing: raw mouse input becomes board gestures.
//!
//! This layer only decides *what was hit* — chip, enclosure, or empty
//! board — and whether a press crossed the drag threshold. What a gesture
//! means is decided by the state machine in `board::drag`. Pointer input
//! claimed by egui (toolbar, search field) never reaches the board.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use board::drag::{DragState, GestureEvent, HoverTarget};
use board::enclosure::EnclosureSet;
use board::occupant::OccupantRoster;
use board::selection::EditMode;

use crate::board_render::ChipIndex;
use crate::camera::BoardCamera;
use crate::layout::{enclosure_at, BoardBounds};

/// Cursor travel in screen pixels before a press on a chip becomes a drag.
pub const DRAG_THRESHOLD: f32 = 5.0;

/// Where the current left press started and what it hit.
#[derive(Resource, Default)]
pub struct PressState {
    pub pressed: bool,
    pub start: Vec2,
    /// Occupant chip under the press, if any.
    pub on_chip: Option<String>,
    /// That chip's enclosure at press time.
    pub origin: Option<String>,
    /// True once the press crossed the drag threshold.
    pub became_drag: bool,
}

impl PressState {
    fn reset(&mut self) {
        self.pressed = false;
        self.on_chip = None;
        self.origin = None;
        self.became_drag = false;
    }
}

/// Screen position → board-space position under the current transform.
pub fn screen_to_board(pos: Vec2, camera: &BoardCamera) -> Vec2 {
    (pos - camera.offset) / camera.scale
}

/// System: translate presses, releases, and cursor travel into
/// [`GestureEvent`]s, and keep the drop-target hover up to date while a
/// drag is active.
#[allow(clippy::too_many_arguments)]
pub fn emit_gestures(
    mut contexts: EguiContexts,
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window>,
    camera: Res<BoardCamera>,
    chip_index: Res<ChipIndex>,
    enclosures: Res<EnclosureSet>,
    bounds: Res<BoardBounds>,
    roster: Res<OccupantRoster>,
    edit: Res<EditMode>,
    drag_state: Res<DragState>,
    mut press: ResMut<PressState>,
    mut hover: ResMut<HoverTarget>,
    mut gestures: EventWriter<GestureEvent>,
) {
    if keys.just_pressed(KeyCode::Escape) && drag_state.dragging() {
        gestures.send(GestureEvent::DragAborted);
        press.reset();
        return;
    }

    if contexts.ctx_mut().wants_pointer_input() {
        // A drag carried onto an egui panel cannot drop anywhere.
        if drag_state.dragging() {
            gestures.send(GestureEvent::DragAborted);
        }
        if press.pressed {
            press.reset();
        }
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        // Releasing outside the window aborts an active drag.
        if buttons.just_released(MouseButton::Left) && press.pressed {
            if press.became_drag || drag_state.dragging() {
                gestures.send(GestureEvent::DragAborted);
            }
            press.reset();
        }
        return;
    };
    let board_pos = screen_to_board(cursor, &camera);

    if buttons.just_pressed(MouseButton::Left) {
        press.pressed = true;
        press.start = cursor;
        press.became_drag = false;
        press.on_chip = chip_index.chip_at(board_pos).map(str::to_string);
        press.origin = press
            .on_chip
            .as_deref()
            .and_then(|id| roster.get(id))
            .and_then(|o| o.enclosure.clone());
    }

    // A press on a chip becomes a drag once it travels far enough.
    if press.pressed && !press.became_drag && edit.0 {
        if let Some(occupant_id) = press.on_chip.clone() {
            if (cursor - press.start).length() > DRAG_THRESHOLD {
                press.became_drag = true;
                gestures.send(GestureEvent::DragBegan {
                    occupant_id,
                    origin: press.origin.clone(),
                });
            }
        }
    }

    if drag_state.dragging() {
        let over = enclosure_at(&enclosures.enclosures, &bounds, board_pos).map(str::to_string);
        if hover.0 != over {
            hover.0 = over;
        }
    }

    if buttons.just_released(MouseButton::Left) {
        if press.pressed {
            if press.became_drag || drag_state.dragging() {
                match enclosure_at(&enclosures.enclosures, &bounds, board_pos) {
                    Some(code) => gestures.send(GestureEvent::DroppedOn {
                        enclosure: code.to_string(),
                    }),
                    None => gestures.send(GestureEvent::DragAborted),
                };
            } else if let Some(occupant_id) = press.on_chip.clone() {
                gestures.send(GestureEvent::TappedOccupant { occupant_id });
            } else if let Some(code) = enclosure_at(&enclosures.enclosures, &bounds, board_pos) {
                gestures.send(GestureEvent::TappedEnclosure {
                    enclosure: code.to_string(),
                });
            }
        }
        press.reset();
    }
}
