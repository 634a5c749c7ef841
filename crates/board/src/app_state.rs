//! Top-level board lifecycle state.
//!
//! Defines [`BoardState`], a Bevy [`States`] enum that governs the data
//! lifecycle: initial load, the interactive board, and the load-failure
//! screen. The state lives here (in the `board` crate) so every other crate
//! can gate systems on it without circular dependencies.

use bevy::prelude::*;

/// Data lifecycle of the board.
///
/// Engine systems are gated behind `in_state(BoardState::Ready)`; gestures
/// and moves are inert while a load is in flight or has failed.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoardState {
    /// The initial load (or a reload) is in flight.
    #[default]
    Loading,
    /// Board data is present and the board is interactive.
    Ready,
    /// Loading failed; an error screen is shown until a manual reload.
    LoadFailed,
}

/// Human-readable message for the [`BoardState::LoadFailed`] state.
///
/// Retained until the next reload attempt, per the error-handling contract:
/// load failures are sticky, not auto-dismissing.
#[derive(Resource, Default)]
pub struct LoadFailure(pub Option<String>);

/// Request a full reload of board data from the store.
///
/// Fired by the toolbar reload button, the error screen retry button, and
/// the persistence layer when a write fails after an optimistic move. A
/// reload replaces the whole occupant roster, discarding any optimistic
/// state that was never confirmed.
#[derive(Event, Debug)]
pub struct ReloadRequested;
