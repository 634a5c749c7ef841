//! Enclosure records and the capacity rule.
//!
//! Enclosures are loaded once per session and treated as static for layout
//! purposes; only their derived occupancy changes. Capacity is a pure
//! function of the enclosure code, not a stored field, so the rule cannot
//! drift out of sync with persisted data.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Capacity of an ordinary enclosure.
pub const DEFAULT_CAPACITY: usize = 2;

/// Capacity of the communal pen (code `"cs"`).
pub const COMMUNAL_CAPACITY: usize = 70;

/// Capacity of the overflow holding pen (code `"átmeneti hely"`).
pub const HOLDING_CAPACITY: usize = 150;

/// Enclosure codes excluded from normal selection flows and always rendered
/// de-emphasized. Compared in normalized form (see [`normalize_code`]).
const INACTIVE_CODES: &[&str] = &["atmeneti hely"];

/// A fixed spatial slot on the board, identified by its code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enclosure {
    pub code: String,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Lower-cases, trims, and strips diacritics so codes entered with or
/// without accents compare equal ("Átmeneti hely" == "atmeneti hely").
pub fn normalize_code(code: &str) -> String {
    code.nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect::<String>()
        .trim()
        .to_lowercase()
}

/// Maximum simultaneous occupants the enclosure with this code accepts.
pub fn capacity_for(code: &str) -> usize {
    match normalize_code(code).as_str() {
        "cs" => COMMUNAL_CAPACITY,
        "atmeneti hely" => HOLDING_CAPACITY,
        _ => DEFAULT_CAPACITY,
    }
}

/// Whether this code names an inactive enclosure.
pub fn is_inactive(code: &str) -> bool {
    INACTIVE_CODES.contains(&normalize_code(code).as_str())
}

/// All enclosures of the current session, in load order.
#[derive(Resource, Default)]
pub struct EnclosureSet {
    pub enclosures: Vec<Enclosure>,
}

impl EnclosureSet {
    pub fn get(&self, code: &str) -> Option<&Enclosure> {
        self.enclosures.iter().find(|e| e.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(capacity_for("A1"), 2);
        assert_eq!(capacity_for("B7"), 2);
        assert_eq!(capacity_for("h/1"), 2);
    }

    #[test]
    fn test_communal_capacity() {
        assert_eq!(capacity_for("cs"), 70);
        assert_eq!(capacity_for("CS"), 70);
        assert_eq!(capacity_for("  cs "), 70);
    }

    #[test]
    fn test_holding_capacity_diacritics_insensitive() {
        assert_eq!(capacity_for("átmeneti hely"), 150);
        assert_eq!(capacity_for("atmeneti hely"), 150);
        assert_eq!(capacity_for("Átmeneti Hely"), 150);
    }

    #[test]
    fn test_normalize_code_strips_accents_and_case() {
        assert_eq!(normalize_code("Átmeneti hely"), "atmeneti hely");
        assert_eq!(normalize_code("  A1 "), "a1");
        assert_eq!(normalize_code(""), "");
    }

    #[test]
    fn test_inactive_enclosures() {
        assert!(is_inactive("átmeneti hely"));
        assert!(is_inactive("Atmeneti hely"));
        assert!(!is_inactive("cs"));
        assert!(!is_inactive("A1"));
    }

    #[test]
    fn test_enclosure_set_lookup() {
        let set = EnclosureSet {
            enclosures: vec![Enclosure {
                code: "A1".to_string(),
                x: 10.0,
                y: 20.0,
                w: 120.0,
                h: 90.0,
            }],
        };
        assert!(set.contains("A1"));
        assert!(!set.contains("A2"));
        assert_eq!(set.get("A1").unwrap().w, 120.0);
    }
}
