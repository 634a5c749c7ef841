//! Transient status toast (capacity rejections and similar).

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use board::status::StatusMessage;

pub fn status_toast_ui(mut contexts: EguiContexts, status: Res<StatusMessage>) {
    if !status.active() {
        return;
    }
    let text_color = if status.is_error {
        egui::Color32::from_rgb(255, 120, 120)
    } else {
        egui::Color32::from_rgb(220, 220, 220)
    };
    egui::Area::new(egui::Id::new("status_toast"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
        .show(contexts.ctx_mut(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.colored_label(text_color, &status.text);
            });
        });
}
