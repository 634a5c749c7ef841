use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use board::app_state::BoardState;

pub mod error_screen;
pub mod search;
pub mod theme;
pub mod toast;
pub mod toolbar;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<toolbar::TrainerEditor>()
            .add_systems(Startup, theme::apply_board_theme)
            .add_systems(
                Update,
                (
                    toolbar::toolbar_ui,
                    search::search_keybinds,
                    search::refocus_on_query_change,
                    toast::status_toast_ui,
                )
                    .chain()
                    .run_if(in_state(BoardState::Ready)),
            )
            .add_systems(Update, error_screen::lifecycle_overlay_ui);
    }
}
