//! Occupant records and the shared occupant cache.

use std::cmp::Ordering;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// A relocatable entity assigned to at most one enclosure.
///
/// Occupants are created and deleted by an external collaborator; this core
/// only ever reassigns `enclosure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occupant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub chip: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub parents: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub flag: bool,
    #[serde(default)]
    pub enclosure: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Sort order of occupants inside an enclosure: ordering index first,
/// missing indices counting as zero, then name.
pub fn chip_order(a: &Occupant, b: &Occupant) -> Ordering {
    a.order
        .unwrap_or(0)
        .cmp(&b.order.unwrap_or(0))
        .then_with(|| a.name.cmp(&b.name))
}

/// The single shared mutable occupant cache.
///
/// Only the placement engine and the full-reload path write to it; layout,
/// camera, and search read. `generation` is bumped on every full reload so
/// results of async writes issued against an older roster can be recognized
/// as stale and discarded.
#[derive(Resource, Default)]
pub struct OccupantRoster {
    pub occupants: Vec<Occupant>,
    pub generation: u64,
}

impl OccupantRoster {
    /// Replace the whole roster (full reload), discarding any optimistic
    /// local state.
    pub fn replace(&mut self, occupants: Vec<Occupant>) {
        self.occupants = occupants;
        self.generation += 1;
    }

    pub fn get(&self, id: &str) -> Option<&Occupant> {
        self.occupants.iter().find(|o| o.id == id)
    }

    /// Live occupancy count of an enclosure.
    pub fn count_in(&self, code: &str) -> usize {
        self.occupants
            .iter()
            .filter(|o| o.enclosure.as_deref() == Some(code))
            .count()
    }

    /// Occupants of an enclosure in display order.
    pub fn in_enclosure(&self, code: &str) -> Vec<&Occupant> {
        let mut here: Vec<&Occupant> = self
            .occupants
            .iter()
            .filter(|o| o.enclosure.as_deref() == Some(code))
            .collect();
        here.sort_by(|a, b| chip_order(a, b));
        here
    }

    /// Reassign one occupant's enclosure. Returns false for unknown ids.
    pub fn reassign(&mut self, id: &str, to: Option<&str>) -> bool {
        match self.occupants.iter_mut().find(|o| o.id == id) {
            Some(occ) => {
                occ.enclosure = to.map(str::to_string);
                true
            }
            None => false,
        }
    }
}
