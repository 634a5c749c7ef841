use bevy::prelude::*;

pub mod loader;
pub mod storage_error;
pub mod store;
pub mod trainers_io;
pub mod writes;


pub use storage_error::StorageError;
pub use store::BoardStore;

pub struct StoragePlugin;

impl Plugin for StoragePlugin {
    fn build(&self, app: &mut App) {
        // Tests (and tools) may insert a store pointed at their own data
        // directory before adding the plugin.
        if !app.world().contains_resource::<BoardStore>() {
            app.insert_resource(BoardStore::from_env());
        }
        app.init_resource::<loader::LoadInFlight>()
            .init_resource::<writes::WriteQueue>()
            .init_resource::<trainers_io::SavedTrainers>()
            .add_systems(
                Startup,
                (loader::begin_initial_load, trainers_io::load_trainers),
            )
            .add_systems(
                Update,
                (
                    loader::handle_reload_requests,
                    loader::poll_load,
                    writes::enqueue_assignment_writes,
                    writes::pump_writes,
                    trainers_io::save_trainers_on_change,
                )
                    .chain(),
            );
    }
}
