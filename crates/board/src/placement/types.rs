//! Events of the placement engine.

use bevy::prelude::*;

/// A request to relocate one occupant into a target enclosure.
///
/// Produced by the drag state machine on a drop and by the pending-move tap
/// flow. A drop on the occupant's current enclosure is a valid target and
/// goes through the same capacity check as any other move.
#[derive(Event, Debug, Clone)]
pub struct MoveRequest {
    pub occupant_id: String,
    /// Enclosure the occupant was in when the gesture started.
    pub from: Option<String>,
    pub to: String,
}

/// Emitted after a successful optimistic reassignment so the storage layer
/// can persist it.
///
/// `generation` is the roster generation the local write was applied
/// against; a write result arriving after a reload (generation mismatch)
/// describes state that no longer exists and is discarded.
#[derive(Event, Debug, Clone)]
pub struct PersistAssignment {
    pub occupant_id: String,
    pub enclosure: Option<String>,
    pub generation: u64,
}
