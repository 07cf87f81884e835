//! Reconstruction of the outer corner ring from the interior grid.

use gridboard_core::BoardSpec;
use nalgebra::{Point2, Vector2};
use serde::Serialize;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{InteriorCornerGrid, LatticeError, SpacingStats};

/// All `(N+1)`×`(N+1)` cell corners of the board, row-major.
///
/// The central `(N-1)`×`(N-1)` block is the detected interior grid; the border
/// ring is extrapolated.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FullCornerLattice {
    spec: BoardSpec,
    points: Vec<Point2<f32>>,
}

impl FullCornerLattice {
    /// Wrap an externally computed lattice, checking that it has `(N+1)²` points.
    pub fn from_points(spec: BoardSpec, points: Vec<Point2<f32>>) -> Result<Self, LatticeError> {
        let expected = spec.lattice_count();
        if points.len() != expected {
            return Err(LatticeError::LatticeShape {
                expected,
                got: points.len(),
            });
        }
        Ok(Self { spec, points })
    }

    #[inline]
    pub fn spec(&self) -> BoardSpec {
        self.spec
    }

    /// Lattice corners per side (`N + 1`).
    #[inline]
    pub fn side(&self) -> usize {
        self.spec.lattice_side()
    }

    /// Corner at lattice row `row`, column `col`.
    ///
    /// Panics if either index is `>= side()`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Point2<f32> {
        self.points[row * self.side() + col]
    }

    #[inline]
    pub fn points(&self) -> &[Point2<f32>] {
        &self.points
    }

    /// Outer board corners: top-left, top-right, bottom-right, bottom-left.
    pub fn outer_corners(&self) -> [Point2<f32>; 4] {
        let n = self.side() - 1;
        [
            self.get(0, 0),
            self.get(0, n),
            self.get(n, n),
            self.get(n, 0),
        ]
    }
}

/// Extend the interior grid by one grid pitch on every side.
///
/// Border points move along a single image axis from their interior
/// neighbour: right/left by `avg_horizontal` keeping y, down/up by
/// `avg_vertical` keeping x. The four outer corners are filled last from the
/// already extended top and bottom rows, which places each of them on the
/// outward diagonal of the nearest interior corner.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(grid, spacing), fields(side = grid.side()))
)]
pub fn extrapolate(grid: &InteriorCornerGrid, spacing: &SpacingStats) -> FullCornerLattice {
    let spec = grid.spec();
    let n = spec.size();
    let side = spec.lattice_side();
    let at = |row: usize, col: usize| row * side + col;

    let mut points = vec![Point2::origin(); side * side];
    for row in 0..grid.side() {
        for col in 0..grid.side() {
            points[at(row + 1, col + 1)] = grid.get(row, col);
        }
    }

    let dx = Vector2::new(spacing.avg_horizontal, 0.0);
    let dy = Vector2::new(0.0, spacing.avg_vertical);

    // right and bottom
    for i in 1..n {
        points[at(i, n)] = points[at(i, n - 1)] + dx;
    }
    for j in 1..n {
        points[at(n, j)] = points[at(n - 1, j)] + dy;
    }
    // left and top
    for i in 1..n {
        points[at(i, 0)] = points[at(i, 1)] - dx;
    }
    for j in 1..n {
        points[at(0, j)] = points[at(1, j)] - dy;
    }

    // corners depend on the border rows above
    points[at(0, 0)] = points[at(0, 1)] - dx;
    points[at(0, n)] = points[at(0, n - 1)] + dx;
    points[at(n, 0)] = points[at(n, 1)] - dx;
    points[at(n, n)] = points[at(n, n - 1)] + dx;

    log::debug!(
        "extrapolated {}x{} lattice, outer corners {:?} .. {:?}",
        side,
        side,
        points[at(0, 0)],
        points[at(n, n)]
    );

    FullCornerLattice { spec, points }
}
