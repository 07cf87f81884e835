//! Grid pitch estimated from the interior corners.

use nalgebra::distance;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{InteriorCornerGrid, LatticeError};

/// Mean distance between adjacent interior corners along each axis, in pixels.
///
/// Both values are strictly positive and finite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpacingStats {
    pub avg_horizontal: f32,
    pub avg_vertical: f32,
}

impl SpacingStats {
    /// Validate a spacing pair.
    pub fn new(avg_horizontal: f32, avg_vertical: f32) -> Result<Self, LatticeError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(avg_horizontal) || !valid(avg_vertical) {
            return Err(LatticeError::DegenerateSpacing {
                horizontal: avg_horizontal,
                vertical: avg_vertical,
            });
        }
        Ok(Self {
            avg_horizontal,
            avg_vertical,
        })
    }

    /// Mean of the two pitches.
    #[inline]
    pub fn mean(&self) -> f32 {
        0.5 * (self.avg_horizontal + self.avg_vertical)
    }

    /// Largest marker-to-center distance accepted when assigning markers to cells.
    #[inline]
    pub fn match_threshold(&self) -> f32 {
        self.mean()
    }

    /// Approximate cell area in square pixels.
    #[inline]
    pub fn cell_area(&self) -> f32 {
        self.avg_horizontal * self.avg_vertical
    }
}

/// Average the distances between every pair of horizontally and vertically
/// adjacent interior corners.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(grid), fields(side = grid.side()))
)]
pub fn compute_spacing(grid: &InteriorCornerGrid) -> Result<SpacingStats, LatticeError> {
    let side = grid.side();

    let mut horizontal = Vec::with_capacity(side * (side - 1));
    let mut vertical = Vec::with_capacity(side * (side - 1));
    for row in 0..side {
        for col in 0..side {
            let p = grid.get(row, col);
            if col + 1 < side {
                horizontal.push(distance(&p, &grid.get(row, col + 1)));
            }
            if row + 1 < side {
                vertical.push(distance(&p, &grid.get(row + 1, col)));
            }
        }
    }

    let stats = SpacingStats::new(mean(&horizontal), mean(&vertical))?;
    log::debug!(
        "grid spacing: horizontal={:.3}px vertical={:.3}px over {} pairs",
        stats.avg_horizontal,
        stats.avg_vertical,
        horizontal.len() + vertical.len()
    );
    Ok(stats)
}

fn mean(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return f32::NAN;
    }
    let sum: f64 = samples.iter().map(|&d| d as f64).sum();
    (sum / samples.len() as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gridboard_core::BoardSpec;
    use nalgebra::Point2;

    fn uniform_grid(spec: BoardSpec, origin: (f32, f32), h: f32, v: f32) -> InteriorCornerGrid {
        let side = spec.interior_side();
        let points = (0..side * side)
            .map(|k| {
                let (row, col) = (k / side, k % side);
                Point2::new(origin.0 + h * col as f32, origin.1 + v * row as f32)
            })
            .collect();
        InteriorCornerGrid::new(spec, points).expect("grid")
    }

    #[test]
    fn uniform_grid_spacing_is_exact() {
        let grid = uniform_grid(BoardSpec::default(), (12.5, 40.0), 31.0, 27.5);
        let s = compute_spacing(&grid).expect("spacing");
        assert_relative_eq!(s.avg_horizontal, 31.0, epsilon = 1e-4);
        assert_relative_eq!(s.avg_vertical, 27.5, epsilon = 1e-4);
        assert_relative_eq!(s.match_threshold(), 29.25, epsilon = 1e-4);
        assert_relative_eq!(s.cell_area(), 31.0 * 27.5, epsilon = 1e-2);
    }

    #[test]
    fn spacing_uses_euclidean_distance_on_rotated_grid() {
        let spec = BoardSpec::new(4).expect("spec");
        let (c, s) = (30f32.to_radians().cos(), 30f32.to_radians().sin());
        let points = (0..9)
            .map(|k| {
                let (row, col) = ((k / 3) as f32, (k % 3) as f32);
                let (x, y) = (10.0 * col, 20.0 * row);
                Point2::new(x * c - y * s, x * s + y * c)
            })
            .collect();
        let grid = InteriorCornerGrid::new(spec, points).expect("grid");
        let stats = compute_spacing(&grid).expect("spacing");
        assert_relative_eq!(stats.avg_horizontal, 10.0, epsilon = 1e-4);
        assert_relative_eq!(stats.avg_vertical, 20.0, epsilon = 1e-4);
    }

    #[test]
    fn spacing_averages_jittered_pairs() {
        let spec = BoardSpec::new(3).expect("spec");
        // 2x2 interior: one row pair at 10px, the other at 12px.
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 8.0),
            Point2::new(12.0, 8.0),
        ];
        let grid = InteriorCornerGrid::new(spec, points).expect("grid");
        let stats = compute_spacing(&grid).expect("spacing");
        assert_relative_eq!(stats.avg_horizontal, 11.0, epsilon = 1e-5);
        let diag = (4.0f32 + 64.0).sqrt();
        assert_relative_eq!(stats.avg_vertical, (8.0 + diag) / 2.0, epsilon = 1e-5);
    }

    #[test]
    fn coincident_corners_are_degenerate() {
        let spec = BoardSpec::new(3).expect("spec");
        let grid = InteriorCornerGrid::new(spec, vec![Point2::new(5.0, 5.0); 4]).expect("grid");
        assert!(matches!(
            compute_spacing(&grid),
            Err(LatticeError::DegenerateSpacing { .. })
        ));
    }

    #[test]
    fn spacing_stats_rejects_non_positive_values() {
        assert!(SpacingStats::new(0.0, 1.0).is_err());
        assert!(SpacingStats::new(1.0, -1.0).is_err());
        assert!(SpacingStats::new(f32::NAN, 1.0).is_err());
        assert!(SpacingStats::new(1.0, 2.0).is_ok());
    }
}
