use bevy::prelude::*;

pub mod app_state;
pub mod drag;
pub mod enclosure;
pub mod occupant;
pub mod placement;
pub mod search;
pub mod selection;
pub mod status;
pub mod trainers;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

pub struct BoardPlugin;

impl Plugin for BoardPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<app_state::BoardState>()
            .init_resource::<app_state::LoadFailure>()
            .init_resource::<enclosure::EnclosureSet>()
            .init_resource::<occupant::OccupantRoster>()
            .init_resource::<drag::DragState>()
            .init_resource::<drag::HoverTarget>()
            .init_resource::<selection::EditMode>()
            .init_resource::<selection::Picked>()
            .init_resource::<search::SearchState>()
            .init_resource::<status::StatusMessage>()
            .init_resource::<trainers::TrainerList>()
            .add_event::<app_state::ReloadRequested>()
            .add_event::<drag::GestureEvent>()
            .add_event::<placement::MoveRequest>()
            .add_event::<placement::PersistAssignment>()
            .add_event::<search::FocusRequest>()
            .add_systems(
                Update,
                (
                    drag::advance_drag_state,
                    selection::handle_taps,
                    placement::handle_move_requests,
                    search::refresh_matches,
                )
                    .chain()
                    .run_if(in_state(app_state::BoardState::Ready)),
            )
            .add_systems(Update, status::tick_status_message);
    }
}
