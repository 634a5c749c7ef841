//! Loading and load-failure overlays.
//!
//! A load failure is sticky: the message stays on screen until the user
//! retries, unlike the self-clearing status toast.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use board::app_state::{BoardState, LoadFailure, ReloadRequested};

pub fn lifecycle_overlay_ui(
    mut contexts: EguiContexts,
    state: Res<State<BoardState>>,
    failure: Res<LoadFailure>,
    mut reload: EventWriter<ReloadRequested>,
) {
    match state.get() {
        BoardState::Ready => {}
        BoardState::Loading => {
            egui::Area::new(egui::Id::new("board_loading"))
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(contexts.ctx_mut(), |ui| {
                    ui.heading("Loading board…");
                });
        }
        BoardState::LoadFailed => {
            egui::Window::new("Board failed to load")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(contexts.ctx_mut(), |ui| {
                    let message = failure.0.as_deref().unwrap_or("Unknown error");
                    ui.colored_label(egui::Color32::from_rgb(255, 120, 120), message);
                    ui.add_space(8.0);
                    if ui.button("Retry").clicked() {
                        reload.send(ReloadRequested);
                    }
                });
        }
    }
}
