//! Async board loading and reload.
//!
//! Loads run on the I/O task pool and are polled once per frame; the event
//! loop never blocks. A reload replaces the whole roster (bumping its
//! generation) and is the designated recovery action after an unconfirmed
//! optimistic move.

use bevy::prelude::*;
use bevy::tasks::{block_on, IoTaskPool, Task};
use futures_lite::future;

use board::app_state::{BoardState, LoadFailure, ReloadRequested};
use board::enclosure::{Enclosure, EnclosureSet};
use board::occupant::{Occupant, OccupantRoster};

use crate::store::BoardStore;
use crate::storage_error::StorageError;
use crate::writes::WriteQueue;

type LoadResult = Result<(Vec<Enclosure>, Vec<Occupant>), StorageError>;

#[derive(Resource, Default)]
pub struct LoadInFlight(Option<Task<LoadResult>>);

fn spawn_load(store: &BoardStore, in_flight: &mut LoadInFlight) {
    let store = store.clone();
    in_flight.0 = Some(IoTaskPool::get().spawn(async move { store.load_board() }));
}

/// System (startup): kick off the initial load.
pub fn begin_initial_load(store: Res<BoardStore>, mut in_flight: ResMut<LoadInFlight>) {
    spawn_load(&store, &mut in_flight);
}

/// System: a reload request replaces any in-flight load and drops writes
/// queued against the roster that is about to be discarded.
pub fn handle_reload_requests(
    mut reloads: EventReader<ReloadRequested>,
    store: Res<BoardStore>,
    mut in_flight: ResMut<LoadInFlight>,
    mut queue: ResMut<WriteQueue>,
    mut next_state: ResMut<NextState<BoardState>>,
) {
    if reloads.is_empty() {
        return;
    }
    reloads.clear();
    queue.drop_queued();
    spawn_load(&store, &mut in_flight);
    next_state.set(BoardState::Loading);
}

/// System: poll the load task; on success install the data and go ready,
/// on failure surface a sticky error state.
pub fn poll_load(
    mut in_flight: ResMut<LoadInFlight>,
    mut enclosures: ResMut<EnclosureSet>,
    mut roster: ResMut<OccupantRoster>,
    mut failure: ResMut<LoadFailure>,
    mut next_state: ResMut<NextState<BoardState>>,
) {
    let Some(task) = in_flight.0.as_mut() else {
        return;
    };
    let Some(result) = block_on(future::poll_once(task)) else {
        return;
    };
    in_flight.0 = None;

    match result {
        Ok((loaded_enclosures, loaded_occupants)) => {
            info!(
                "board loaded: {} enclosures, {} occupants",
                loaded_enclosures.len(),
                loaded_occupants.len()
            );
            enclosures.enclosures = loaded_enclosures;
            roster.replace(loaded_occupants);
            failure.0 = None;
            next_state.set(BoardState::Ready);
        }
        Err(e) => {
            error!("board load failed: {e}");
            failure.0 = Some(e.to_string());
            next_state.set(BoardState::LoadFailed);
        }
    }
}
