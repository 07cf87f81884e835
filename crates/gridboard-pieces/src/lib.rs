//! Mapping of detected colored markers onto board cells.
//!
//! Every marker is matched to the nearest cell center; markers farther than
//! the mean grid pitch from any center are dropped. The result is a set of
//! `(color, cell)` pairs, so repeated detections of the same piece collapse
//! to one entry. [`BoardState`] is the JSON record written per photo.

mod assign;
mod marker;
mod record;

pub use assign::{
    assign_markers, nearest_cell, pieces_from_matches, AssignParams, MarkerAssigner, MarkerMatch,
    NearestCell, PieceAssignment,
};
pub use marker::{ColorLabel, Marker};
pub use record::{BoardState, StateIoError};
