//! Asynchronous persistence of optimistic moves.
//!
//! Accepted moves arrive as `PersistAssignment` events after the local
//! roster was already updated — the optimistic write happens-before the
//! persistence request is issued. Writes are serialized (one task in
//! flight, the rest queued) so concurrent read-modify-write cycles cannot
//! interleave on the same file.
//!
//! Every write carries the roster generation it was issued against. A
//! result that arrives after a reload (generation mismatch) describes
//! state that no longer exists and is discarded instead of triggering
//! recovery — the "still interested" guard.

use std::collections::VecDeque;

use bevy::prelude::*;
use bevy::tasks::{block_on, IoTaskPool, Task};
use futures_lite::future;

use board::app_state::ReloadRequested;
use board::occupant::OccupantRoster;
use board::placement::PersistAssignment;

use crate::store::BoardStore;
use crate::storage_error::StorageError;

struct QueuedWrite {
    occupant_id: String,
    enclosure: Option<String>,
    generation: u64,
}

#[derive(Resource, Default)]
pub struct WriteQueue {
    queued: VecDeque<QueuedWrite>,
    in_flight: Option<(u64, Task<Result<(), StorageError>>)>,
}

impl WriteQueue {
    /// Whether any write is still unconfirmed (drives the saving
    /// indicator).
    pub fn in_flight(&self) -> bool {
        self.in_flight.is_some() || !self.queued.is_empty()
    }

    /// Drop writes that were queued but never dispatched. Called when a
    /// reload begins; the in-flight task keeps running and its result is
    /// discarded by the generation guard.
    pub(crate) fn drop_queued(&mut self) {
        self.queued.clear();
    }
}

/// System: queue accepted moves for persistence.
pub fn enqueue_assignment_writes(
    mut events: EventReader<PersistAssignment>,
    mut queue: ResMut<WriteQueue>,
) {
    for event in events.read() {
        queue.queued.push_back(QueuedWrite {
            occupant_id: event.occupant_id.clone(),
            enclosure: event.enclosure.clone(),
            generation: event.generation,
        });
    }
}

/// System: poll the in-flight write and dispatch the next queued one.
///
/// A failed write against the current roster triggers a full reload — no
/// targeted rollback — accepting that other unconfirmed optimistic changes
/// are discarded with it.
pub fn pump_writes(
    store: Res<BoardStore>,
    roster: Res<OccupantRoster>,
    mut queue: ResMut<WriteQueue>,
    mut reload: EventWriter<ReloadRequested>,
) {
    if let Some((generation, task)) = queue.in_flight.as_mut() {
        let Some(result) = block_on(future::poll_once(task)) else {
            return;
        };
        let generation = *generation;
        queue.in_flight = None;
        match result {
            Ok(()) => {}
            Err(e) if generation == roster.generation => {
                warn!("persisting a move failed ({e}); reloading the board");
                reload.send(ReloadRequested);
                return;
            }
            Err(e) => {
                debug!("ignoring stale write failure from before a reload: {e}");
            }
        }
    }

    while let Some(write) = queue.queued.pop_front() {
        if write.generation != roster.generation {
            // Issued against a roster that has since been replaced.
            continue;
        }
        let generation = write.generation;
        let store = store.clone();
        let task = IoTaskPool::get().spawn(async move {
            store.update_assignment(&write.occupant_id, write.enclosure.as_deref())
        });
        queue.in_flight = Some((generation, task));
        break;
    }
}
