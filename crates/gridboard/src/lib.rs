//! High-level facade for the `gridboard-*` workspace.
//!
//! This crate provides:
//! - re-exports of the underlying crates,
//! - [`pipeline::BoardReader`], which runs lattice reconstruction and marker
//!   assignment on detector output,
//! - JSON inputs for pre-computed detections and reader configuration,
//! - (feature `image`) concrete corner and marker detectors working on
//!   `image` buffers, plus an overlay renderer for debugging.
//!
//! ## Quickstart
//!
//! ```
//! use gridboard::pipeline::{BoardReader, ReaderParams};
//! use gridboard::{BoardSpec, Marker};
//! use nalgebra::Point2;
//!
//! # fn main() -> Result<(), gridboard::LatticeError> {
//! let spec = BoardSpec::default();
//! let side = spec.interior_side();
//! let corners: Vec<Point2<f32>> = (0..side * side)
//!     .map(|k| Point2::new(100.0 + 50.0 * (k % side) as f32, 100.0 + 50.0 * (k / side) as f32))
//!     .collect();
//!
//! let reader = BoardReader::new(spec, ReaderParams::default());
//! let reading = reader.read(Some(corners), &[Marker::new("red", 126.0, 124.0)])?;
//! let state = reading.to_state();
//! println!("{}", state.to_json_string().unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `gridboard::core`: board size and cell coordinates.
//! - `gridboard::lattice`: spacing, lattice extrapolation, cell centers.
//! - `gridboard::pieces`: markers, assignment, board-state record.
//! - `gridboard::detect` (feature `image`): detectors and the photo pipeline.
//! - `gridboard::overlay` (feature `image`): debug rendering.

pub use gridboard_core as core;
pub use gridboard_lattice as lattice;
pub use gridboard_pieces as pieces;

pub use gridboard_core::{BoardSpec, CellCoords};
pub use gridboard_lattice::{LatticeError, SpacingStats};
pub use gridboard_pieces::{BoardState, ColorLabel, Marker, PieceAssignment};

pub mod io;
pub mod pipeline;

#[cfg(feature = "image")]
pub mod detect;
#[cfg(feature = "image")]
pub mod overlay;
