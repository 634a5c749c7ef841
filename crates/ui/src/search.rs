//! Search navigation: keybinds and first-match auto-focus.
//!
//! The match computation itself lives in `board::search`; this module only
//! drives it from the keyboard and pushes focus requests at the rendering
//! layer.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use board::search::{FocusRequest, SearchState};

/// System: F3 / Shift+F3 step through matches; Enter advances when the
/// keyboard is not captured by a text field.
pub fn search_keybinds(
    mut contexts: EguiContexts,
    keys: Res<ButtonInput<KeyCode>>,
    mut search: ResMut<SearchState>,
    mut focus: EventWriter<FocusRequest>,
) {
    if !search.active() {
        return;
    }
    let shift = keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);
    let f3 = keys.just_pressed(KeyCode::F3);
    let enter = keys.just_pressed(KeyCode::Enter) && !contexts.ctx_mut().wants_keyboard_input();

    let stepped = if f3 && shift {
        search.prev().map(str::to_string)
    } else if f3 || enter {
        search.next().map(str::to_string)
    } else {
        None
    };
    if let Some(occupant_id) = stepped {
        focus.send(FocusRequest { occupant_id });
    }
}

/// System: whenever the effective query changes and has matches, jump to
/// the first one.
pub fn refocus_on_query_change(
    mut last_needle: Local<String>,
    search: Res<SearchState>,
    mut focus: EventWriter<FocusRequest>,
) {
    if search.needle == *last_needle {
        return;
    }
    *last_needle = search.needle.clone();
    if let Some(id) = search.match_list.first() {
        focus.send(FocusRequest {
            occupant_id: id.clone(),
        });
    }
}
