//! JSON-file board store.
//!
//! `enclosures.json`, `occupants.json`, and `trainers.json` live in one
//! data directory (default `./paddock-data`, overridable via the
//! `PADDOCK_DATA_DIR` environment variable). Writes use the write-rename
//! pattern so a crash mid-write cannot corrupt the previous file. A
//! missing data directory is seeded with a default board so the app runs
//! from scratch.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use board::enclosure::Enclosure;
use board::occupant::Occupant;

use crate::storage_error::StorageError;

#[derive(Resource, Clone)]
pub struct BoardStore {
    dir: PathBuf,
}

impl BoardStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_env() -> Self {
        let dir = std::env::var("PADDOCK_DATA_DIR").unwrap_or_else(|_| "paddock-data".to_string());
        Self::new(dir)
    }

    fn enclosures_path(&self) -> PathBuf {
        self.dir.join("enclosures.json")
    }

    fn occupants_path(&self) -> PathBuf {
        self.dir.join("occupants.json")
    }

    fn trainers_path(&self) -> PathBuf {
        self.dir.join("trainers.json")
    }

    /// Read both board files, seeding a default board first if none exists.
    pub fn load_board(&self) -> Result<(Vec<Enclosure>, Vec<Occupant>), StorageError> {
        self.seed_if_missing()?;
        let enclosures = read_json(&self.enclosures_path())?;
        let occupants = read_json(&self.occupants_path())?;
        Ok((enclosures, occupants))
    }

    /// Rewrite one occupant's enclosure assignment.
    pub fn update_assignment(
        &self,
        occupant_id: &str,
        enclosure: Option<&str>,
    ) -> Result<(), StorageError> {
        let mut occupants: Vec<Occupant> = read_json(&self.occupants_path())?;
        let Some(occupant) = occupants.iter_mut().find(|o| o.id == occupant_id) else {
            return Err(StorageError::MissingOccupant(occupant_id.to_string()));
        };
        occupant.enclosure = enclosure.map(str::to_string);
        write_json_atomic(&self.occupants_path(), &occupants)
    }

    /// Load the trainers list. Corruption is never fatal here: unparsable
    /// content loads as an empty list.
    pub fn load_trainers(&self) -> Vec<String> {
        match fs::read_to_string(self.trainers_path()) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!("trainers file is unreadable, starting empty: {e}");
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    pub fn save_trainers(&self, names: &[String]) -> Result<(), StorageError> {
        write_json_atomic(&self.trainers_path(), &names)
    }

    fn seed_if_missing(&self) -> Result<(), StorageError> {
        if self.enclosures_path().exists() {
            return Ok(());
        }
        info!("no board data at {:?}, seeding a default board", self.dir);
        write_json_atomic(&self.enclosures_path(), &default_enclosures())?;
        write_json_atomic(&self.occupants_path(), &sample_occupants())?;
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Atomic write using the write-rename pattern: write `{path}.tmp`, flush
/// to persistent storage, rename over the final path. A crash mid-write
/// leaves the previous file untouched.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let data =
        serde_json::to_vec_pretty(value).map_err(|e| StorageError::Encode(e.to_string()))?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let mut file = File::create(&tmp)?;
    file.write_all(&data)?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// The seeded board: two rows of ordinary pens plus the two large pens.
fn default_enclosures() -> Vec<Enclosure> {
    let mut enclosures = Vec::new();
    for i in 0..6 {
        enclosures.push(Enclosure {
            code: format!("A{}", i + 1),
            x: i as f32 * 140.0,
            y: 0.0,
            w: 120.0,
            h: 90.0,
        });
    }
    for i in 0..6 {
        enclosures.push(Enclosure {
            code: format!("B{}", i + 1),
            x: i as f32 * 140.0,
            y: 120.0,
            w: 120.0,
            h: 90.0,
        });
    }
    enclosures.push(Enclosure {
        code: "cs".to_string(),
        x: 0.0,
        y: 260.0,
        w: 620.0,
        h: 300.0,
    });
    enclosures.push(Enclosure {
        code: "átmeneti hely".to_string(),
        x: 660.0,
        y: 260.0,
        w: 620.0,
        h: 300.0,
    });
    enclosures
}

fn sample_occupants() -> Vec<Occupant> {
    let seeds: [(&str, &str, Option<&str>, Option<&str>); 6] = [
        ("occ-1", "Rex", Some("A1"), Some("#c2703d")),
        ("occ-2", "Fido", Some("A1"), None),
        ("occ-3", "Nora", Some("B2"), Some("#3d78c2")),
        ("occ-4", "Buksi", Some("cs"), None),
        ("occ-5", "Morzsa", Some("cs"), Some("#3dc27a")),
        ("occ-6", "Vacak", None, None),
    ];
    seeds
        .into_iter()
        .enumerate()
        .map(|(i, (id, name, enclosure, color))| Occupant {
            id: id.to_string(),
            name: name.to_string(),
            chip: Some(format!("90000{i}")),
            info: None,
            parents: None,
            color: color.map(str::to_string),
            labels: Vec::new(),
            flag: false,
            enclosure: enclosure.map(str::to_string),
            order: Some(i as i32),
            created_at: None,
            updated_at: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unique temp directory per test.
    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("paddock_store_test_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_seed_and_load_round_trip() {
        let dir = test_dir("seed_and_load");
        let store = BoardStore::new(&dir);

        let (enclosures, occupants) = store.load_board().unwrap();
        assert!(enclosures.iter().any(|e| e.code == "cs"));
        assert!(enclosures.iter().any(|e| e.code == "átmeneti hely"));
        assert!(!occupants.is_empty());

        // A second load reads the same seeded files back.
        let (enclosures2, occupants2) = store.load_board().unwrap();
        assert_eq!(enclosures, enclosures2);
        assert_eq!(occupants, occupants2);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_update_assignment_persists() {
        let dir = test_dir("update_assignment");
        let store = BoardStore::new(&dir);
        store.load_board().unwrap();

        store.update_assignment("occ-1", Some("B3")).unwrap();

        let (_, occupants) = store.load_board().unwrap();
        let rex = occupants.iter().find(|o| o.id == "occ-1").unwrap();
        assert_eq!(rex.enclosure.as_deref(), Some("B3"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_update_assignment_unknown_occupant_errors() {
        let dir = test_dir("update_missing");
        let store = BoardStore::new(&dir);
        store.load_board().unwrap();

        let err = store.update_assignment("ghost", Some("A1")).unwrap_err();
        assert!(matches!(err, StorageError::MissingOccupant(_)));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_board_file_is_a_load_error() {
        let dir = test_dir("corrupt_board");
        let store = BoardStore::new(&dir);
        store.load_board().unwrap();
        fs::write(dir.join("occupants.json"), "{ not json").unwrap();

        let err = store.load_board().unwrap_err();
        assert!(matches!(err, StorageError::Decode(_)));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_trainers_load_as_empty() {
        let dir = test_dir("corrupt_trainers");
        let store = BoardStore::new(&dir);
        fs::write(dir.join("trainers.json"), "not json at all").unwrap();

        assert!(store.load_trainers().is_empty());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_trainers_round_trip() {
        let dir = test_dir("trainers_round_trip");
        let store = BoardStore::new(&dir);

        assert!(store.load_trainers().is_empty());
        store
            .save_trainers(&["Anna".to_string(), "Bela".to_string()])
            .unwrap();
        assert_eq!(store.load_trainers(), vec!["Anna", "Bela"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let dir = test_dir("atomic_tmp");
        let path = dir.join("occupants.json");
        write_json_atomic(&path, &vec!["x".to_string()]).unwrap();

        assert!(path.exists());
        assert!(!dir.join("occupants.json.tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
