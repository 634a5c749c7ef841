//! The move protocol: capacity check, optimistic write, persistence handoff.

use bevy::prelude::*;

use crate::enclosure::capacity_for;
use crate::occupant::OccupantRoster;
use crate::status::StatusMessage;

use super::types::{MoveRequest, PersistAssignment};

/// Outcome of a single move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MoveOutcome {
    Accepted,
    Rejected,
    UnknownOccupant,
}

/// Check capacity against the live local roster and apply the reassignment
/// optimistically.
///
/// The count deliberately comes from the local cache, not a fresh store
/// read, and the local write lands before the persistence request is
/// issued. Two sessions racing into the same near-full enclosure can
/// therefore jointly exceed capacity until the next reload; enforcing the
/// limit atomically would need a store-side constraint.
///
/// The count includes the moving occupant if it already sits in the target,
/// so a drop back into a full enclosure is rejected like any other move.
pub(crate) fn try_move(
    roster: &mut OccupantRoster,
    status: &mut StatusMessage,
    occupant_id: &str,
    to: &str,
) -> MoveOutcome {
    if roster.get(occupant_id).is_none() {
        warn!("move requested for unknown occupant {occupant_id}");
        return MoveOutcome::UnknownOccupant;
    }
    let capacity = capacity_for(to);
    if roster.count_in(to) >= capacity {
        status.set(format!("Enclosure {to} is full ({capacity})."), true);
        return MoveOutcome::Rejected;
    }
    roster.reassign(occupant_id, Some(to));
    MoveOutcome::Accepted
}

/// System: drain [`MoveRequest`] events through [`try_move`] and hand
/// accepted moves to the storage layer.
pub fn handle_move_requests(
    mut requests: EventReader<MoveRequest>,
    mut roster: ResMut<OccupantRoster>,
    mut status: ResMut<StatusMessage>,
    mut persist: EventWriter<PersistAssignment>,
) {
    for req in requests.read() {
        let outcome = try_move(&mut roster, &mut status, &req.occupant_id, &req.to);
        if outcome == MoveOutcome::Accepted {
            debug!(
                "moved {} from {:?} to {}",
                req.occupant_id, req.from, req.to
            );
            persist.send(PersistAssignment {
                occupant_id: req.occupant_id.clone(),
                enclosure: Some(req.to.clone()),
                generation: roster.generation,
            });
        }
    }
}
