use serde::{Deserialize, Serialize};

/// Number of cells per side on the standard board.
pub const DEFAULT_BOARD_SIZE: u32 = 15;

/// Board size validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardSpecError {
    #[error("board size must be >= 3 cells per side (got {size})")]
    TooSmall { size: u32 },
}

/// Square board of `size`×`size` cells.
///
/// The detector only sees the `(size-1)`×`(size-1)` interior grid-line
/// intersections; the full lattice of cell corners is `(size+1)`×`(size+1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BoardSpec {
    size: u32,
}

impl BoardSpec {
    /// Validate and create a board spec.
    pub fn new(size: u32) -> Result<Self, BoardSpecError> {
        // Spacing needs at least two interior corners along each axis.
        if size < 3 {
            return Err(BoardSpecError::TooSmall { size });
        }
        Ok(Self { size })
    }

    /// Cells per side (`N`).
    #[inline]
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Interior corners per side (`N - 1`).
    #[inline]
    pub fn interior_side(&self) -> usize {
        self.size() - 1
    }

    /// Lattice corners per side (`N + 1`).
    #[inline]
    pub fn lattice_side(&self) -> usize {
        self.size() + 1
    }

    #[inline]
    pub fn interior_count(&self) -> usize {
        self.interior_side() * self.interior_side()
    }

    #[inline]
    pub fn lattice_count(&self) -> usize {
        self.lattice_side() * self.lattice_side()
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size() * self.size()
    }
}

impl Default for BoardSpec {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
        }
    }
}

impl TryFrom<u32> for BoardSpec {
    type Error = BoardSpecError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<BoardSpec> for u32 {
    fn from(spec: BoardSpec) -> Self {
        spec.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_is_fifteen_by_fifteen() {
        let spec = BoardSpec::default();
        assert_eq!(spec.size(), 15);
        assert_eq!(spec.interior_side(), 14);
        assert_eq!(spec.lattice_side(), 16);
        assert_eq!(spec.interior_count(), 196);
        assert_eq!(spec.lattice_count(), 256);
        assert_eq!(spec.cell_count(), 225);
    }

    #[test]
    fn rejects_boards_without_two_interior_corners_per_axis() {
        assert_eq!(BoardSpec::new(2), Err(BoardSpecError::TooSmall { size: 2 }));
        assert_eq!(BoardSpec::new(0), Err(BoardSpecError::TooSmall { size: 0 }));
        assert!(BoardSpec::new(3).is_ok());
    }

    #[test]
    fn deserialization_validates_size() {
        let spec: BoardSpec = serde_json::from_str("9").expect("valid size");
        assert_eq!(spec.size(), 9);
        assert!(serde_json::from_str::<BoardSpec>("1").is_err());
        assert_eq!(serde_json::to_string(&spec).expect("serialize"), "9");
    }
}
