use gridboard_core::{BoardSpec, CellCoords};
use nalgebra::Point2;
use serde::Serialize;

use crate::FullCornerLattice;

/// Centers of all `N`×`N` cells, row-major (`index = row * N + col`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellCenterGrid {
    spec: BoardSpec,
    centers: Vec<Point2<f32>>,
}

impl CellCenterGrid {
    #[inline]
    pub fn spec(&self) -> BoardSpec {
        self.spec
    }

    /// Number of cells (`N²`).
    #[inline]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Center of `cell`.
    ///
    /// Panics if `cell` lies outside the board.
    #[inline]
    pub fn get(&self, cell: CellCoords) -> Point2<f32> {
        self.centers[cell.to_index(self.spec.size())]
    }

    /// Cell addressed by a flat row-major index.
    #[inline]
    pub fn coords(&self, index: usize) -> CellCoords {
        CellCoords::from_index(index, self.spec.size())
    }

    #[inline]
    pub fn centers(&self) -> &[Point2<f32>] {
        &self.centers
    }

    /// `(cell, center)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoords, Point2<f32>)> + '_ {
        self.centers
            .iter()
            .enumerate()
            .map(|(k, &p)| (self.coords(k), p))
    }
}

/// Mean of the four lattice corners bounding each cell.
pub fn cell_centers(lattice: &FullCornerLattice) -> CellCenterGrid {
    let spec = lattice.spec();
    let n = spec.size();
    let mut centers = Vec::with_capacity(spec.cell_count());
    for i in 0..n {
        for j in 0..n {
            let corners = [
                lattice.get(i, j),
                lattice.get(i, j + 1),
                lattice.get(i + 1, j),
                lattice.get(i + 1, j + 1),
            ];
            let x = corners.iter().map(|p| p.x).sum::<f32>() / 4.0;
            let y = corners.iter().map(|p| p.y).sum::<f32>() / 4.0;
            centers.push(Point2::new(x, y));
        }
    }
    CellCenterGrid { spec, centers }
}
