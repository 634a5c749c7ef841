//! Relocation gesture state machine.
//!
//! Gestures from the input layer drive one explicit state machine instead
//! of ad hoc payload plumbing:
//!
//! ```text
//! Idle ── drag began ──▶ Dragging { occupant, origin } ── drop ──▶ Idle (+ MoveRequest)
//!   │                          │
//!   │                          └── abort (Escape, drop outside) ──▶ Idle
//!   └── tap occupant (edit) ──▶ PendingMove { occupant } ── tap enclosure ──▶ Idle (+ MoveRequest)
//! ```
//!
//! Board panning is suspended while the state is `Dragging` (mutual
//! exclusion between "move an occupant" and "pan the board").

use bevy::prelude::*;

use crate::occupant::OccupantRoster;
use crate::placement::MoveRequest;
use crate::selection::EditMode;

/// Low-level gestures recognized by the input layer.
///
/// The input layer does hit testing only; what a gesture *means* is decided
/// here and in the selection module.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum GestureEvent {
    /// The cursor started dragging an occupant chip (edit mode only).
    DragBegan {
        occupant_id: String,
        origin: Option<String>,
    },
    /// An active drag ended over an enclosure.
    DroppedOn { enclosure: String },
    /// An active drag ended outside every enclosure, or Escape was pressed.
    DragAborted,
    /// A press-release on an occupant chip that never crossed the drag
    /// threshold.
    TappedOccupant { occupant_id: String },
    /// A press-release on an enclosure (not on a chip).
    TappedEnclosure { enclosure: String },
}

#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// An occupant chip is being dragged.
    Dragging {
        occupant_id: String,
        origin: Option<String>,
    },
    /// Edit mode: an occupant was tapped; the next enclosure tap moves it.
    PendingMove { occupant_id: String },
}

impl DragState {
    pub fn dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn pending(&self) -> Option<&str> {
        match self {
            DragState::PendingMove { occupant_id } => Some(occupant_id),
            _ => None,
        }
    }
}

/// Enclosure currently under an active drag (drop-target highlight).
#[derive(Resource, Debug, Default, PartialEq)]
pub struct HoverTarget(pub Option<String>);

/// Apply one gesture to the state machine. Returns the `(occupant, target)`
/// pair of a completed move, if the gesture completed one.
pub(crate) fn transition(
    state: &mut DragState,
    edit_mode: bool,
    gesture: &GestureEvent,
) -> Option<(String, String)> {
    match gesture {
        GestureEvent::DragBegan {
            occupant_id,
            origin,
        } => {
            if edit_mode {
                *state = DragState::Dragging {
                    occupant_id: occupant_id.clone(),
                    origin: origin.clone(),
                };
            }
            None
        }
        GestureEvent::DroppedOn { enclosure } => {
            if let DragState::Dragging { occupant_id, .. } = state {
                let completed = (occupant_id.clone(), enclosure.clone());
                *state = DragState::Idle;
                Some(completed)
            } else {
                None
            }
        }
        GestureEvent::DragAborted => {
            if state.dragging() {
                *state = DragState::Idle;
            }
            None
        }
        GestureEvent::TappedOccupant { occupant_id } => {
            if edit_mode {
                // Tapping the already-pending occupant disarms it.
                *state = if state.pending() == Some(occupant_id.as_str()) {
                    DragState::Idle
                } else {
                    DragState::PendingMove {
                        occupant_id: occupant_id.clone(),
                    }
                };
            }
            None
        }
        GestureEvent::TappedEnclosure { enclosure } => {
            if let DragState::PendingMove { occupant_id } = state {
                let completed = (occupant_id.clone(), enclosure.clone());
                *state = DragState::Idle;
                Some(completed)
            } else {
                None
            }
        }
    }
}

/// System: drain gestures through the state machine, emitting a
/// [`MoveRequest`] for every completed move.
pub fn advance_drag_state(
    mut gestures: EventReader<GestureEvent>,
    mut state: ResMut<DragState>,
    mut hover: ResMut<HoverTarget>,
    edit: Res<EditMode>,
    roster: Res<OccupantRoster>,
    mut moves: EventWriter<MoveRequest>,
) {
    for gesture in gestures.read() {
        if let Some((occupant_id, to)) = transition(&mut state, edit.0, gesture) {
            let from = roster
                .get(&occupant_id)
                .and_then(|o| o.enclosure.clone());
            moves.send(MoveRequest {
                occupant_id,
                from,
                to,
            });
        }
    }
    if !state.dragging() && hover.0.is_some() {
        hover.0 = None;
    }
}
