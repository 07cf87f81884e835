use gridboard_core::BoardSpec;
use nalgebra::Point2;
use serde::Serialize;

use crate::LatticeError;

/// Detected interior corners of the board, `(N-1)`×`(N-1)` points in row-major order.
///
/// Row `r` runs along image x, from the top interior grid line downwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InteriorCornerGrid {
    spec: BoardSpec,
    points: Vec<Point2<f32>>,
}

impl InteriorCornerGrid {
    /// Wrap detector output, checking that it has exactly `(N-1)²` points.
    pub fn new(spec: BoardSpec, points: Vec<Point2<f32>>) -> Result<Self, LatticeError> {
        let expected = spec.interior_count();
        if points.len() != expected {
            return Err(LatticeError::InsufficientGrid {
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

    /// Interior corners per side (`N - 1`).
    #[inline]
    pub fn side(&self) -> usize {
        self.spec.interior_side()
    }

    /// Corner at interior row `row`, column `col`.
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

    pub fn into_points(self) -> Vec<Point2<f32>> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_point_count() {
        let spec = BoardSpec::new(5).expect("spec");
        let err = InteriorCornerGrid::new(spec, vec![Point2::origin(); 15]).unwrap_err();
        assert_eq!(
            err,
            LatticeError::InsufficientGrid {
                expected: 16,
                got: 15
            }
        );
    }

    #[test]
    fn indexes_row_major() {
        let spec = BoardSpec::new(4).expect("spec");
        let points: Vec<Point2<f32>> = (0..9).map(|k| Point2::new(k as f32, 0.0)).collect();
        let grid = InteriorCornerGrid::new(spec, points).expect("grid");
        assert_eq!(grid.side(), 3);
        assert_eq!(grid.get(1, 2).x, 5.0);
        assert_eq!(grid.get(2, 0).x, 6.0);
    }
}
