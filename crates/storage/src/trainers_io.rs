//! Trainers list persistence: load at startup, rewrite on every change.

use bevy::prelude::*;

use board::trainers::TrainerList;

use crate::store::BoardStore;

/// The list as last written to (or read from) disk, so identical states
/// are not rewritten.
#[derive(Resource, Default)]
pub struct SavedTrainers(Vec<String>);

/// System (startup): load the list; malformed content loads as empty.
pub fn load_trainers(
    store: Res<BoardStore>,
    mut trainers: ResMut<TrainerList>,
    mut saved: ResMut<SavedTrainers>,
) {
    let names = store.load_trainers();
    saved.0 = names.clone();
    trainers.names = names;
}

/// System: rewrite the file whenever the list actually changes.
pub fn save_trainers_on_change(
    store: Res<BoardStore>,
    trainers: Res<TrainerList>,
    mut saved: ResMut<SavedTrainers>,
) {
    if !trainers.is_changed() || trainers.names == saved.0 {
        return;
    }
    match store.save_trainers(&trainers.names) {
        Ok(()) => {
            saved.0 = trainers.names.clone();
        }
        Err(e) => {
            warn!("failed to save trainers: {e}");
        }
    }
}
