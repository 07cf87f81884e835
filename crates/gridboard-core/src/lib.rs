//! Core types for reading the state of a square grid board.
//!
//! This crate is intentionally small. It knows the board dimensions and how
//! to address a cell, and it carries the logger setup shared by the rest of
//! the workspace. It does *not* depend on any image type or detector.

mod board;
mod cell;
mod logger;

pub use board::{BoardSpec, BoardSpecError, DEFAULT_BOARD_SIZE};
pub use cell::CellCoords;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
