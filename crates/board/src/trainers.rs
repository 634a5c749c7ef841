//! Client-local list of trainer names.
//!
//! A small named list of free-text strings with an explicit lifecycle: the
//! storage layer loads it at startup and rewrites it on every change.
//! Unparsable stored content loads as an empty list, never an error.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct TrainerList {
    pub names: Vec<String>,
}

impl TrainerList {
    /// Trim the name, ignore empties, deduplicate. Returns whether the
    /// list changed.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.names.iter().any(|n| n == name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }
}
