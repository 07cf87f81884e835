use serde::{Deserialize, Serialize};

/// Integer coordinates of a board cell: `row` grows downwards, `col` to the right.
///
/// Ordering is lexicographic on `(row, col)`, i.e. row-major scan order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoords {
    pub row: usize,
    pub col: usize,
}

impl CellCoords {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Recover coordinates from a row-major flat index on a board with `size` cells per side.
    #[inline]
    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }

    /// Row-major flat index on a board with `size` cells per side.
    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// `[row, col]` pair as written in board-state records.
    #[inline]
    pub fn as_array(self) -> [usize; 2] {
        [self.row, self.col]
    }
}

impl From<[usize; 2]> for CellCoords {
    fn from([row, col]: [usize; 2]) -> Self {
        Self { row, col }
    }
}
