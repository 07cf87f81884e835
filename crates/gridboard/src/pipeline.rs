//! Detector output -> lattice -> cell centers -> piece assignments.

use std::collections::BTreeSet;

use gridboard_core::BoardSpec;
use gridboard_lattice::{
    cell_centers, compute_spacing, extrapolate, CellCenterGrid, FullCornerLattice,
    InteriorCornerGrid, LatticeError, SpacingStats,
};
use gridboard_pieces::{
    pieces_from_matches, AssignParams, BoardState, Marker, MarkerAssigner, MarkerMatch,
    PieceAssignment,
};
use log::info;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Tunables of the geometric pipeline.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReaderParams {
    #[serde(default)]
    pub assign: AssignParams,
}

/// Board geometry reconstructed from one set of interior corners.
#[derive(Clone, Debug, Serialize)]
pub struct BoardGeometry {
    pub spacing: SpacingStats,
    pub lattice: FullCornerLattice,
    pub centers: CellCenterGrid,
}

/// Result of reading one photo.
#[derive(Clone, Debug, Serialize)]
pub struct BoardReading {
    /// `None` when the corner detector did not find the board.
    pub geometry: Option<BoardGeometry>,
    pub markers: Vec<Marker>,
    /// One entry per marker, same order as `markers`.
    pub matches: Vec<MarkerMatch>,
    pub pieces: BTreeSet<PieceAssignment>,
}

impl BoardReading {
    /// Reading for a photo in which no board was found.
    pub fn not_found() -> Self {
        Self {
            geometry: None,
            markers: Vec::new(),
            matches: Vec::new(),
            pieces: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn board_found(&self) -> bool {
        self.geometry.is_some()
    }

    /// Board-state record stamped with the current local time.
    pub fn to_state(&self) -> BoardState {
        BoardState::new(self.pieces.iter().cloned())
    }
}

/// Runs the geometric pipeline for a fixed board size.
#[derive(Clone, Debug)]
pub struct BoardReader {
    spec: BoardSpec,
    assigner: MarkerAssigner,
}

impl BoardReader {
    pub fn new(spec: BoardSpec, params: ReaderParams) -> Self {
        Self {
            spec,
            assigner: MarkerAssigner::new(params.assign),
        }
    }

    #[inline]
    pub fn spec(&self) -> BoardSpec {
        self.spec
    }

    #[inline]
    pub fn assigner(&self) -> &MarkerAssigner {
        &self.assigner
    }

    /// Spacing, full lattice and cell centers from `(N-1)²` row-major interior corners.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, corners), fields(corners = corners.len()))
    )]
    pub fn geometry(&self, corners: Vec<Point2<f32>>) -> Result<BoardGeometry, LatticeError> {
        let grid = InteriorCornerGrid::new(self.spec, corners)?;
        let spacing = compute_spacing(&grid)?;
        let lattice = extrapolate(&grid, &spacing);
        let centers = cell_centers(&lattice);
        Ok(BoardGeometry {
            spacing,
            lattice,
            centers,
        })
    }

    /// Assign markers to the cells of an already reconstructed board.
    pub fn assign(&self, geometry: BoardGeometry, markers: Vec<Marker>) -> BoardReading {
        let matches = self
            .assigner
            .match_markers(&markers, &geometry.centers, &geometry.spacing);
        let pieces = pieces_from_matches(&markers, &matches);
        BoardReading {
            geometry: Some(geometry),
            markers,
            matches,
            pieces,
        }
    }

    /// Full pipeline on detector output.
    ///
    /// `corners == None` means the corner detector did not find the board: no
    /// geometry is built and the reading has zero pieces.
    pub fn read(
        &self,
        corners: Option<Vec<Point2<f32>>>,
        markers: &[Marker],
    ) -> Result<BoardReading, LatticeError> {
        let Some(corners) = corners else {
            info!("board not detected, skipping {} markers", markers.len());
            return Ok(BoardReading::not_found());
        };
        let geometry = self.geometry(corners)?;
        Ok(self.assign(geometry, markers.to_vec()))
    }
}

impl Default for BoardReader {
    fn default() -> Self {
        Self::new(BoardSpec::default(), ReaderParams::default())
    }
}
