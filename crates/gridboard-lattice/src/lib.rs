//! Board lattice reconstruction from the interior corners of a square grid.
//!
//! A corner detector only finds the `(N-1)`×`(N-1)` grid-line intersections
//! inside the playing surface; the outer boundary is usually hidden by a frame
//! or falls outside the photo. This crate rebuilds the missing border ring and
//! derives the center of every cell.
//!
//! ## Quickstart
//!
//! ```
//! use gridboard_core::{BoardSpec, CellCoords};
//! use gridboard_lattice::{cell_centers, compute_spacing, extrapolate, InteriorCornerGrid};
//! use nalgebra::Point2;
//!
//! # fn main() -> Result<(), gridboard_lattice::LatticeError> {
//! let spec = BoardSpec::default();
//! let side = spec.interior_side();
//! let points: Vec<Point2<f32>> = (0..side * side)
//!     .map(|k| Point2::new(100.0 + 50.0 * (k % side) as f32, 100.0 + 50.0 * (k / side) as f32))
//!     .collect();
//!
//! let grid = InteriorCornerGrid::new(spec, points)?;
//! let spacing = compute_spacing(&grid)?;
//! let lattice = extrapolate(&grid, &spacing);
//! let centers = cell_centers(&lattice);
//!
//! assert_eq!(lattice.get(0, 0), Point2::new(50.0, 50.0));
//! assert_eq!(centers.get(CellCoords::new(0, 0)), Point2::new(75.0, 75.0));
//! assert_eq!(centers.get(CellCoords::new(1, 1)), Point2::new(125.0, 125.0));
//! # Ok(())
//! # }
//! ```
//!
//! Stages:
//! 1. [`compute_spacing`]: mean distance between horizontally and vertically
//!    adjacent interior corners.
//! 2. [`extrapolate`]: extend the interior grid by one pitch on every side.
//! 3. [`cell_centers`]: average the four corners of each cell.
//!
//! [`SpacingStats`] is returned by the first stage and passed explicitly to
//! everything downstream that needs the grid pitch.

mod centers;
mod error;
mod extrapolate;
mod interior;
mod spacing;

pub use centers::{cell_centers, CellCenterGrid};
pub use error::LatticeError;
pub use extrapolate::{extrapolate, FullCornerLattice};
pub use interior::InteriorCornerGrid;
pub use spacing::{compute_spacing, SpacingStats};
