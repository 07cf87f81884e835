use gridboard_core::BoardSpecError;

/// Errors produced while building the board lattice.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    #[error(transparent)]
    BoardSpec(#[from] BoardSpecError),

    #[error("interior grid has {got} corners, expected {expected}")]
    InsufficientGrid { expected: usize, got: usize },

    #[error("corner lattice has {got} points, expected {expected}")]
    LatticeShape { expected: usize, got: usize },

    #[error("degenerate grid spacing (horizontal={horizontal}, vertical={vertical})")]
    DegenerateSpacing { horizontal: f32, vertical: f32 },
}
