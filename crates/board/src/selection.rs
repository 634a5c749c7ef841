//! Occupant selection and edit mode.
//!
//! In normal mode a tap toggles an occupant in the picked set (consumed by
//! the print/export collaborator); occupants sitting in inactive enclosures
//! are never added. In edit mode taps belong to the drag state machine
//! instead, so this module stays out of the way.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::drag::GestureEvent;
use crate::enclosure::is_inactive;
use crate::occupant::OccupantRoster;

/// Whether relocation gestures are armed.
#[derive(Resource, Default)]
pub struct EditMode(pub bool);

/// Occupants picked in normal mode.
#[derive(Resource, Default)]
pub struct Picked(pub HashSet<String>);

impl Picked {
    pub fn toggle(&mut self, id: &str) {
        if !self.0.remove(id) {
            self.0.insert(id.to_string());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }
}

/// System: normal-mode occupant taps toggle the picked set.
pub fn handle_taps(
    mut gestures: EventReader<GestureEvent>,
    edit: Res<EditMode>,
    roster: Res<OccupantRoster>,
    mut picked: ResMut<Picked>,
) {
    if edit.0 {
        return;
    }
    for gesture in gestures.read() {
        let GestureEvent::TappedOccupant { occupant_id } = gesture else {
            continue;
        };
        let Some(occupant) = roster.get(occupant_id) else {
            continue;
        };
        if occupant
            .enclosure
            .as_deref()
            .is_some_and(is_inactive)
        {
            continue;
        }
        picked.toggle(occupant_id);
    }
}
