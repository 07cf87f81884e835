//! JSON board-state record written for every processed photo.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::assign::PieceAssignment;

#[derive(thiserror::Error, Debug)]
pub enum StateIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Pieces found on the board at a point in time.
///
/// ```json
/// { "timestamp": "2024-05-01T12:30:00.123456", "pieces": [["red", [0, 0]]] }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// ISO-8601 local time of the reading.
    pub timestamp: String,
    pub pieces: Vec<PieceAssignment>,
}

impl BoardState {
    /// Record `pieces` stamped with the current local time.
    pub fn new(pieces: impl IntoIterator<Item = PieceAssignment>) -> Self {
        Self::with_timestamp(now_iso8601(), pieces)
    }

    pub fn with_timestamp(
        timestamp: impl Into<String>,
        pieces: impl IntoIterator<Item = PieceAssignment>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            pieces: pieces.into_iter().collect(),
        }
    }

    /// Record with no pieces, used when the board itself was not found.
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    pub fn to_json_string(&self) -> Result<String, StateIoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a record from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, StateIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this record to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), StateIoError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

fn now_iso8601() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
