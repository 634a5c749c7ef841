//! Query matching over the occupant roster.
//!
//! `set_query` recomputes all derived match state synchronously; an empty
//! (or whitespace-only) query is inert rather than matching everything.
//! Navigation wraps cyclically over the stable match list, which keeps the
//! roster's own iteration order.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::occupant::{Occupant, OccupantRoster};

/// Ask the rendering layer to center the camera on a matched occupant's
/// chip once it has been committed to the board.
#[derive(Event, Debug, Clone)]
pub struct FocusRequest {
    pub occupant_id: String,
}

#[derive(Resource, Default)]
pub struct SearchState {
    /// Raw query text as typed.
    pub query: String,
    /// Trimmed, lower-cased query; empty means search is inert.
    pub needle: String,
    /// Ids of matched occupants.
    pub match_set: HashSet<String>,
    /// Matched ids in roster order — the stable iteration order used for
    /// navigation.
    pub match_list: Vec<String>,
    /// Enclosures holding at least one match; everything else is dimmed
    /// while a query is active.
    pub enclosures_with_matches: HashSet<String>,
    /// Cyclic cursor into `match_list`.
    pub match_index: usize,
}

impl SearchState {
    pub fn active(&self) -> bool {
        !self.needle.is_empty()
    }

    /// Replace the query and recompute everything derived from it. The
    /// index resets to 0 whenever the effective query changes.
    pub fn set_query(&mut self, roster: &OccupantRoster, text: &str) {
        self.query = text.to_string();
        let needle = text.trim().to_lowercase();
        let changed = needle != self.needle;
        self.needle = needle;
        self.recompute(roster);
        if changed {
            self.match_index = 0;
        }
    }

    /// Recompute match sets against the current roster. Also called when
    /// the roster itself changes under an unchanged query (moves, reloads).
    pub fn recompute(&mut self, roster: &OccupantRoster) {
        self.match_set.clear();
        self.match_list.clear();
        self.enclosures_with_matches.clear();
        if self.needle.is_empty() {
            self.match_index = 0;
            return;
        }
        for occupant in &roster.occupants {
            if matches_query(occupant, &self.needle) {
                self.match_set.insert(occupant.id.clone());
                self.match_list.push(occupant.id.clone());
                if let Some(enclosure) = &occupant.enclosure {
                    self.enclosures_with_matches.insert(enclosure.clone());
                }
            }
        }
        if self.match_list.is_empty() {
            self.match_index = 0;
        } else if self.match_index >= self.match_list.len() {
            self.match_index = self.match_list.len() - 1;
        }
    }

    /// Advance the cursor, wrapping past the end.
    pub fn next(&mut self) -> Option<&str> {
        if self.match_list.is_empty() {
            return None;
        }
        self.match_index = (self.match_index + 1) % self.match_list.len();
        self.current()
    }

    /// Step the cursor back, wrapping from 0 to the last match.
    pub fn prev(&mut self) -> Option<&str> {
        if self.match_list.is_empty() {
            return None;
        }
        self.match_index = (self.match_index + self.match_list.len() - 1) % self.match_list.len();
        self.current()
    }

    pub fn current(&self) -> Option<&str> {
        self.match_list.get(self.match_index).map(String::as_str)
    }

    /// Reset the query and all derived state.
    pub fn clear(&mut self) {
        self.query.clear();
        self.needle.clear();
        self.match_set.clear();
        self.match_list.clear();
        self.enclosures_with_matches.clear();
        self.match_index = 0;
    }
}

/// Case-insensitive substring match over name and secondary identifier.
fn matches_query(occupant: &Occupant, needle: &str) -> bool {
    occupant.name.to_lowercase().contains(needle)
        || occupant
            .chip
            .as_deref()
            .is_some_and(|chip| chip.to_lowercase().contains(needle))
}

/// System: keep derived match state in sync with roster mutations (moves
/// and reloads).
pub fn refresh_matches(roster: Res<OccupantRoster>, mut search: ResMut<SearchState>) {
    if roster.is_changed() && search.active() {
        search.recompute(&roster);
    }
}
