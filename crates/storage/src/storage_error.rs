// ---------------------------------------------------------------------------
// StorageError: typed errors for board store operations
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while reading or writing board data.
///
/// A typed enum rather than ad-hoc string swallowing so failures can be
/// propagated, matched, and displayed to users.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error (file not found, permission denied, disk full, etc.)
    Io(std::io::Error),
    /// JSON encoding failed.
    Encode(String),
    /// JSON decoding failed (corrupt or invalid board data).
    Decode(String),
    /// An assignment write referenced an occupant the store doesn't have.
    MissingOccupant(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::Encode(msg) => write!(f, "Encoding error: {msg}"),
            StorageError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            StorageError::MissingOccupant(id) => {
                write!(f, "No occupant with id '{id}' in the store")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Decode(e.to_string())
    }
}
