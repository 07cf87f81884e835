use std::cmp::Ordering;

use chess_corners::{find_chess_corners_image, ChessConfig, CornerDescriptor};
use gridboard_core::BoardSpec;
use image::GrayImage;
use imageproc::filter::median_filter;
use log::{debug, info};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use super::InteriorCornerDetector;

/// Settings for [`ChessInteriorCornerDetector`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChessCornerParams {
    /// Median blur radius applied before corner detection (`0` disables it).
    ///
    /// Board textures and printed cell symbols produce spurious corners;
    /// radius 6 is a 13x13 window.
    pub median_radius: u32,
    /// ChESS response threshold relative to the strongest response.
    pub threshold_rel: f32,
}

impl Default for ChessCornerParams {
    fn default() -> Self {
        Self {
            median_radius: 6,
            threshold_rel: 0.2,
        }
    }
}

/// Interior grid detector built on ChESS corners.
///
/// Keeps the `(N-1)²` strongest corners and orders them with
/// [`order_row_major`]. Works for top-down or mildly tilted photos where the
/// grid rows stay separated along image y.
#[derive(Clone, Debug)]
pub struct ChessInteriorCornerDetector {
    params: ChessCornerParams,
}

impl ChessInteriorCornerDetector {
    pub fn new(params: ChessCornerParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &ChessCornerParams {
        &self.params
    }

    fn chess_config(&self) -> ChessConfig {
        let mut cfg = ChessConfig::single_scale();
        cfg.params.threshold_rel = self.params.threshold_rel;
        cfg.params.nms_radius = 2;
        cfg
    }
}

impl Default for ChessInteriorCornerDetector {
    fn default() -> Self {
        Self::new(ChessCornerParams::default())
    }
}

impl InteriorCornerDetector for ChessInteriorCornerDetector {
    fn detect_interior_corners(
        &self,
        image: &GrayImage,
        spec: BoardSpec,
    ) -> Option<Vec<Point2<f32>>> {
        let blurred;
        let input = if self.params.median_radius > 0 {
            blurred = median_filter(image, self.params.median_radius, self.params.median_radius);
            &blurred
        } else {
            image
        };

        let raw: Vec<CornerDescriptor> = find_chess_corners_image(input, &self.chess_config());
        info!("raw ChESS corners: {}", raw.len());

        let candidates: Vec<(Point2<f32>, f32)> = raw
            .iter()
            .map(|c| (Point2::new(c.x, c.y), c.response))
            .collect();
        order_row_major(&candidates, spec.interior_side())
    }
}

/// Arrange the `side²` strongest `(position, response)` candidates into a
/// row-major grid.
///
/// Candidates are sorted by y and cut into rows of `side`, then every row is
/// sorted by x. Returns `None` when there are too few candidates, when the
/// gap between consecutive rows is no larger than the y steps inside them
/// (rows interleave), or when the result is not a grid whose row neighbours
/// step along x and column neighbours along y.
pub fn order_row_major(candidates: &[(Point2<f32>, f32)], side: usize) -> Option<Vec<Point2<f32>>> {
    let wanted = side * side;
    if side == 0 || candidates.len() < wanted {
        debug!(
            "need {} corners for a {}x{} grid, have {}",
            wanted,
            side,
            side,
            candidates.len()
        );
        return None;
    }

    let mut strongest: Vec<(Point2<f32>, f32)> = candidates
        .iter()
        .copied()
        .filter(|(p, _)| p.x.is_finite() && p.y.is_finite())
        .collect();
    strongest.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    strongest.truncate(wanted);
    if strongest.len() < wanted {
        return None;
    }

    let mut points: Vec<Point2<f32>> = strongest.into_iter().map(|(p, _)| p).collect();
    points.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal));

    let rows: Vec<Vec<Point2<f32>>> = points.chunks(side).map(<[_]>::to_vec).collect();
    for pair in rows.windows(2) {
        let gap = y_range(&pair[1]).0 - y_range(&pair[0]).1;
        let step = largest_y_step(&pair[0]).max(largest_y_step(&pair[1]));
        if gap <= step {
            debug!("grid rows not separated in y (gap {:.2} <= step {:.2})", gap, step);
            return None;
        }
    }

    let mut ordered = Vec::with_capacity(wanted);
    for mut row in rows {
        row.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
        ordered.extend(row);
    }

    if !has_grid_structure(&ordered, side) {
        debug!("ordered corners do not form an axis-aligned grid");
        return None;
    }
    Some(ordered)
}

fn y_range(row: &[Point2<f32>]) -> (f32, f32) {
    row.iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        })
}

/// Largest gap between consecutive y values inside one row.
fn largest_y_step(row: &[Point2<f32>]) -> f32 {
    let mut ys: Vec<f32> = row.iter().map(|p| p.y).collect();
    ys.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    ys.windows(2).map(|w| w[1] - w[0]).fold(0.0, f32::max)
}

/// Row neighbours must step mostly along x, column neighbours mostly along y.
fn has_grid_structure(points: &[Point2<f32>], side: usize) -> bool {
    for r in 0..side {
        for c in 0..side {
            let p = points[r * side + c];
            if c + 1 < side {
                let d = points[r * side + c + 1] - p;
                if d.x.abs() <= d.y.abs() {
                    return false;
                }
            }
            if r + 1 < side {
                let d = points[(r + 1) * side + c] - p;
                if d.y.abs() <= d.x.abs() {
                    return false;
                }
            }
        }
    }
    true
}
