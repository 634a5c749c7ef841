//! Headless integration harness: a fluent builder wrapping `bevy::app::App`
//! + [`BoardPlugin`] for exercising the engine without a window or renderer.

use bevy::app::App;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::app_state::BoardState;
use crate::drag::GestureEvent;
use crate::enclosure::{Enclosure, EnclosureSet};
use crate::occupant::{Occupant, OccupantRoster};
use crate::placement::{MoveRequest, PersistAssignment};
use crate::selection::EditMode;
use crate::status::StatusMessage;
use crate::BoardPlugin;

pub struct TestBoard {
    pub app: App,
}

impl TestBoard {
    /// An empty, ready board: systems gated on `BoardState::Ready` run and
    /// data is injected directly by the builder methods below.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);
        app.add_plugins(BoardPlugin);
        app.insert_state(BoardState::Ready);
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    pub fn with_enclosure(mut self, code: &str, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.app
            .world_mut()
            .resource_mut::<EnclosureSet>()
            .enclosures
            .push(Enclosure {
                code: code.to_string(),
                x,
                y,
                w,
                h,
            });
        self
    }

    pub fn with_occupant(self, id: &str, name: &str, enclosure: Option<&str>) -> Self {
        self.with_occupant_record(Occupant {
            id: id.to_string(),
            name: name.to_string(),
            chip: None,
            info: None,
            parents: None,
            color: None,
            labels: Vec::new(),
            flag: false,
            enclosure: enclosure.map(str::to_string),
            order: None,
            created_at: None,
            updated_at: None,
        })
    }

    pub fn with_occupant_record(mut self, occupant: Occupant) -> Self {
        self.app
            .world_mut()
            .resource_mut::<OccupantRoster>()
            .occupants
            .push(occupant);
        self
    }

    /// Fill an enclosure with `n` anonymous occupants.
    pub fn with_filled_enclosure(mut self, code: &str, n: usize) -> Self {
        for i in 0..n {
            self = self.with_occupant(
                &format!("{code}-fill-{i}"),
                &format!("Filler {i}"),
                Some(code),
            );
        }
        self
    }

    pub fn with_edit_mode(mut self) -> Self {
        self.app.world_mut().resource_mut::<EditMode>().0 = true;
        self
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    pub fn tick(&mut self) {
        self.app.update();
    }

    pub fn request_move(&mut self, occupant_id: &str, to: &str) {
        let from = self
            .roster()
            .get(occupant_id)
            .and_then(|o| o.enclosure.clone());
        self.app.world_mut().send_event(MoveRequest {
            occupant_id: occupant_id.to_string(),
            from,
            to: to.to_string(),
        });
        self.tick();
    }

    pub fn gesture(&mut self, gesture: GestureEvent) {
        self.app.world_mut().send_event(gesture);
        self.tick();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn roster(&self) -> &OccupantRoster {
        self.app.world().resource::<OccupantRoster>()
    }

    pub fn count_in(&self, code: &str) -> usize {
        self.roster().count_in(code)
    }

    pub fn enclosure_of(&self, id: &str) -> Option<String> {
        self.roster().get(id).and_then(|o| o.enclosure.clone())
    }

    pub fn status_text(&self) -> String {
        self.app.world().resource::<StatusMessage>().text.clone()
    }

    pub fn status_active(&self) -> bool {
        self.app.world().resource::<StatusMessage>().active()
    }

    /// Drain all pending persistence handoffs.
    pub fn drain_persist_events(&mut self) -> Vec<PersistAssignment> {
        self.app
            .world_mut()
            .resource_mut::<Events<PersistAssignment>>()
            .drain()
            .collect()
    }
}
