//! Top toolbar: viewport controls, search field, edit mode, trainers,
//! saving indicator, reload.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use board::app_state::ReloadRequested;
use board::drag::DragState;
use board::occupant::OccupantRoster;
use board::search::{FocusRequest, SearchState};
use board::selection::{EditMode, Picked};
use board::trainers::TrainerList;
use rendering::camera::{compute_fit, CameraTarget, ViewportSize, BUTTON_ZOOM_STEP};
use rendering::layout::BoardBounds;
use storage::writes::WriteQueue;

/// Draft text of the trainer-add field.
#[derive(Resource, Default)]
pub struct TrainerEditor {
    pub draft: String,
}

#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    viewport: Res<ViewportSize>,
    bounds: Res<BoardBounds>,
    roster: Res<OccupantRoster>,
    writes: Res<WriteQueue>,
    mut target: ResMut<CameraTarget>,
    mut search: ResMut<SearchState>,
    mut edit: ResMut<EditMode>,
    mut picked: ResMut<Picked>,
    mut drag_state: ResMut<DragState>,
    mut trainers: ResMut<TrainerList>,
    mut editor: ResMut<TrainerEditor>,
    mut reload: EventWriter<ReloadRequested>,
    mut focus: EventWriter<FocusRequest>,
) {
    egui::TopBottomPanel::top("board_toolbar").show(contexts.ctx_mut(), |ui| {
        ui.horizontal(|ui| {
            if ui.button("−").on_hover_text("Zoom out").clicked() {
                target.zoom_out(BUTTON_ZOOM_STEP);
            }
            if ui.button("+").on_hover_text("Zoom in").clicked() {
                target.zoom_in(BUTTON_ZOOM_STEP);
            }
            if ui.button("Fit").on_hover_text("Fit board to window").clicked() {
                let fit = compute_fit(*viewport, &bounds);
                target.set_transform(Vec2::ZERO, fit);
            }
            if ui.button("100%").clicked() {
                target.set_transform(Vec2::ZERO, 1.0);
            }

            ui.separator();

            ui.label("Search:");
            let mut text = search.query.clone();
            let response = ui.add(
                egui::TextEdit::singleline(&mut text)
                    .hint_text("name or chip")
                    .desired_width(160.0),
            );
            if response.changed() {
                search.set_query(&roster, &text);
            }
            if search.active() {
                let total = search.match_list.len();
                if total > 0 {
                    ui.label(format!("{} / {}", search.match_index + 1, total));
                    if ui.small_button("◀").clicked() {
                        if let Some(id) = search.prev() {
                            focus.send(FocusRequest {
                                occupant_id: id.to_string(),
                            });
                        }
                    }
                    if ui.small_button("▶").clicked() {
                        if let Some(id) = search.next() {
                            focus.send(FocusRequest {
                                occupant_id: id.to_string(),
                            });
                        }
                    }
                } else {
                    ui.label("no matches");
                }
                if ui.small_button("✕").clicked() {
                    search.clear();
                }
            }

            ui.separator();

            let edit_label = if edit.0 { "Done" } else { "Edit" };
            if ui
                .button(edit_label)
                .on_hover_text("Toggle relocation mode")
                .clicked()
            {
                edit.0 = !edit.0;
                *drag_state = DragState::Idle;
            }
            if ui.button("Clear").on_hover_text("Clear selection and search").clicked() {
                picked.0.clear();
                search.clear();
                *drag_state = DragState::Idle;
            }
            if !picked.0.is_empty() {
                ui.label(format!("{} picked", picked.0.len()));
            }

            ui.separator();

            ui.menu_button("Trainers", |ui| {
                for name in &trainers.names {
                    ui.label(name);
                }
                if trainers.names.is_empty() {
                    ui.weak("none yet");
                }
                ui.separator();
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut editor.draft);
                    if ui.button("Add").clicked() {
                        let draft = editor.draft.clone();
                        if trainers.add(&draft) {
                            editor.draft.clear();
                        }
                    }
                });
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Reload").clicked() {
                    reload.send(ReloadRequested);
                }
                if writes.in_flight() {
                    ui.weak("saving…");
                }
            });
        });
    });
}
