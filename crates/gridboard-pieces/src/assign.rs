use std::collections::BTreeSet;

use gridboard_core::CellCoords;
use gridboard_lattice::{CellCenterGrid, SpacingStats};
use nalgebra::{distance, Point2};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::marker::{ColorLabel, Marker};

/// Marker-to-cell matching settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignParams {
    /// Accept distance in units of the mean grid pitch `(h + v) / 2`.
    pub max_distance_rel: f32,
}

impl Default for AssignParams {
    fn default() -> Self {
        Self {
            max_distance_rel: 1.0,
        }
    }
}

/// A piece of a given color standing on a given cell.
///
/// Ordered by `(color, row, col)`. Serialized as `[color, [row, col]]`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "PieceRecord", into = "PieceRecord")]
pub struct PieceAssignment {
    pub color: ColorLabel,
    pub cell: CellCoords,
}

impl PieceAssignment {
    pub fn new(color: impl Into<ColorLabel>, row: usize, col: usize) -> Self {
        Self {
            color: color.into(),
            cell: CellCoords::new(row, col),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct PieceRecord(ColorLabel, [usize; 2]);

impl From<PieceRecord> for PieceAssignment {
    fn from(PieceRecord(color, cell): PieceRecord) -> Self {
        Self {
            color,
            cell: cell.into(),
        }
    }
}

impl From<PieceAssignment> for PieceRecord {
    fn from(p: PieceAssignment) -> Self {
        PieceRecord(p.color, p.cell.as_array())
    }
}

/// Closest cell center to a point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearestCell {
    pub cell: CellCoords,
    pub center: Point2<f32>,
    pub distance: f32,
}

/// Outcome of matching one marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerMatch {
    /// Index into the marker slice passed to the assigner.
    pub marker_index: usize,
    /// `None` only for non-finite marker positions.
    pub nearest: Option<NearestCell>,
    /// Whether `nearest` lies within the distance threshold.
    pub accepted: bool,
}

impl MarkerMatch {
    /// Cell the marker was assigned to, if it passed the threshold.
    pub fn assigned_cell(&self) -> Option<CellCoords> {
        self.nearest.filter(|_| self.accepted).map(|n| n.cell)
    }
}

/// Scan all centers in row-major order and return the closest one.
///
/// Ties keep the first center encountered.
pub fn nearest_cell(point: Point2<f32>, centers: &CellCenterGrid) -> Option<NearestCell> {
    let mut best: Option<(usize, f32)> = None;
    for (k, center) in centers.centers().iter().enumerate() {
        let d = distance(&point, center);
        let closer = match best {
            None => d.is_finite(),
            Some((_, best_d)) => d < best_d,
        };
        if closer {
            best = Some((k, d));
        }
    }
    best.map(|(k, d)| NearestCell {
        cell: centers.coords(k),
        center: centers.centers()[k],
        distance: d,
    })
}

/// Nearest-center marker assigner with a pitch-relative distance threshold.
#[derive(Clone, Debug, Default)]
pub struct MarkerAssigner {
    params: AssignParams,
}

impl MarkerAssigner {
    pub fn new(params: AssignParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &AssignParams {
        &self.params
    }

    /// Largest accepted marker-to-center distance in pixels.
    #[inline]
    pub fn max_distance(&self, spacing: &SpacingStats) -> f32 {
        spacing.match_threshold() * self.params.max_distance_rel
    }

    /// Match every marker to its nearest cell and flag the ones within threshold.
    pub fn match_markers(
        &self,
        markers: &[Marker],
        centers: &CellCenterGrid,
        spacing: &SpacingStats,
    ) -> Vec<MarkerMatch> {
        let max_distance = self.max_distance(spacing);
        markers
            .iter()
            .enumerate()
            .map(|(marker_index, marker)| {
                let nearest = nearest_cell(marker.position, centers);
                let accepted = nearest.is_some_and(|n| n.distance <= max_distance);
                if !accepted {
                    log::debug!(
                        "dropping {} marker at ({:.1}, {:.1}): nearest center {:?} beyond {:.1}px",
                        marker.color,
                        marker.position.x,
                        marker.position.y,
                        nearest.map(|n| n.distance),
                        max_distance
                    );
                }
                MarkerMatch {
                    marker_index,
                    nearest,
                    accepted,
                }
            })
            .collect()
    }

    /// Assign markers to cells; duplicates of the same `(color, cell)` collapse.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(markers = markers.len()))
    )]
    pub fn assign(
        &self,
        markers: &[Marker],
        centers: &CellCenterGrid,
        spacing: &SpacingStats,
    ) -> BTreeSet<PieceAssignment> {
        let matches = self.match_markers(markers, centers, spacing);
        pieces_from_matches(markers, &matches)
    }
}

/// Build the deduplicated piece set from the matches of [`MarkerAssigner::match_markers`].
pub fn pieces_from_matches(
    markers: &[Marker],
    matches: &[MarkerMatch],
) -> BTreeSet<PieceAssignment> {
    let pieces: BTreeSet<PieceAssignment> = matches
        .iter()
        .filter_map(|m| {
            let cell = m.assigned_cell()?;
            let color = markers.get(m.marker_index)?.color.clone();
            Some(PieceAssignment { color, cell })
        })
        .collect();
    log::info!(
        "assigned {} pieces from {} markers",
        pieces.len(),
        markers.len()
    );
    pieces
}

/// [`MarkerAssigner::assign`] with default parameters.
pub fn assign_markers(
    markers: &[Marker],
    centers: &CellCenterGrid,
    spacing: &SpacingStats,
) -> BTreeSet<PieceAssignment> {
    MarkerAssigner::default().assign(markers, centers, spacing)
}
