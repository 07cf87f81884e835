//! JSON inputs: pre-computed detections and reader configuration.

use gridboard_core::BoardSpec;
use gridboard_pieces::Marker;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::pipeline::{BoardReader, ReaderParams};

#[cfg(feature = "image")]
use crate::detect::{ChessCornerParams, ChessInteriorCornerDetector, HsvMarkerDetector, HsvMarkerParams};

#[derive(thiserror::Error, Debug)]
pub enum GridboardIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Output of external detectors for one photo.
///
/// `corners` is absent when the corner detector did not find the board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionsInput {
    #[serde(default)]
    pub board_size: Option<BoardSpec>,
    #[serde(default)]
    pub corners: Option<Vec<Point2<f32>>>,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

impl DetectionsInput {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, GridboardIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), GridboardIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Everything tunable about a reading run, loadable from JSON.
///
/// Missing sections fall back to their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReaderConfig {
    #[serde(default)]
    pub board: BoardSpec,
    #[serde(default)]
    pub reader: ReaderParams,
    #[cfg(feature = "image")]
    #[serde(default)]
    pub corners: ChessCornerParams,
    #[cfg(feature = "image")]
    #[serde(default)]
    pub markers: HsvMarkerParams,
}

impl ReaderConfig {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, GridboardIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), GridboardIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn build_reader(&self) -> BoardReader {
        BoardReader::new(self.board, self.reader.clone())
    }

    #[cfg(feature = "image")]
    pub fn build_corner_detector(&self) -> ChessInteriorCornerDetector {
        ChessInteriorCornerDetector::new(self.corners.clone())
    }

    #[cfg(feature = "image")]
    pub fn build_marker_detector(&self) -> HsvMarkerDetector {
        HsvMarkerDetector::new(self.markers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detections_without_corners_mean_board_not_found() {
        let input: DetectionsInput = serde_json::from_str(
            r#"{ "markers": [ { "color": "red", "position": [10.0, 20.0] } ] }"#,
        )
        .expect("parse");
        assert!(input.corners.is_none());
        assert!(input.board_size.is_none());
        assert_eq!(input.markers, vec![Marker::new("red", 10.0, 20.0)]);
    }

    #[test]
    fn detections_ignore_unknown_fields() {
        let input: DetectionsInput = serde_json::from_str(
            r#"{ "image_path": "boards/game1.jpg", "board_size": 9, "markers": [] }"#,
        )
        .expect("parse");
        assert_eq!(input.board_size, Some(BoardSpec::new(9).expect("spec")));
        assert!(input.markers.is_empty());
    }

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: ReaderConfig = serde_json::from_str("{}").expect("parse");
        assert_eq!(cfg.board, BoardSpec::default());
        assert_eq!(cfg.reader.assign.max_distance_rel, 1.0);
        assert_eq!(cfg.build_reader().spec().size(), 15);
    }

    #[test]
    fn config_rejects_too_small_board() {
        assert!(serde_json::from_str::<ReaderConfig>(r#"{ "board": 2 }"#).is_err());
    }
}
