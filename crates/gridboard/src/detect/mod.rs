//! Photo-level detectors and the end-to-end reading pipeline.
//!
//! The geometric core only needs two things from an image: the interior
//! grid corners and the colored marker positions. Both sit behind traits so
//! that other detectors can be plugged in; this module ships one
//! implementation of each:
//! - [`ChessInteriorCornerDetector`]: ChESS corners (`chess-corners`) ordered
//!   into a row-major grid,
//! - [`HsvMarkerDetector`]: HSV color thresholds and connected blobs.

mod corners;
mod markers;

pub use corners::{order_row_major, ChessCornerParams, ChessInteriorCornerDetector};
pub use markers::{rgb_to_hsv, ColorClass, HsvMarkerDetector, HsvMarkerParams, HsvRange};

use std::path::Path;

use gridboard_core::BoardSpec;
use gridboard_lattice::{LatticeError, SpacingStats};
use gridboard_pieces::Marker;
use image::{GrayImage, RgbImage};
use log::info;
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::pipeline::{BoardReader, BoardReading};

/// Errors produced by the photo-level helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Lattice(#[from] LatticeError),
}

/// Finds the `(N-1)`×`(N-1)` interior corners of the board.
pub trait InteriorCornerDetector {
    /// Row-major interior corners, or `None` when the board is not found.
    fn detect_interior_corners(&self, image: &GrayImage, spec: BoardSpec)
        -> Option<Vec<Point2<f32>>>;
}

/// Finds colored markers (pieces) on the photo.
pub trait MarkerDetector {
    /// `spacing` gives the grid pitch, which bounds plausible blob sizes.
    fn detect_markers(&self, image: &RgbImage, spacing: &SpacingStats) -> Vec<Marker>;
}

/// Load a photo as 8-bit RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage, DetectError> {
    Ok(image::open(path)?.to_rgb8())
}

/// Run corner detection, lattice reconstruction, marker detection and
/// assignment on one photo.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(image, corner_detector, marker_detector, reader),
        fields(width = image.width(), height = image.height())
    )
)]
pub fn read_board_image<C, M>(
    image: &RgbImage,
    corner_detector: &C,
    marker_detector: &M,
    reader: &BoardReader,
) -> Result<BoardReading, LatticeError>
where
    C: InteriorCornerDetector + ?Sized,
    M: MarkerDetector + ?Sized,
{
    let gray = image::imageops::grayscale(image);
    let Some(corners) = corner_detector.detect_interior_corners(&gray, reader.spec()) else {
        info!("no {0}x{0} interior grid found", reader.spec().interior_side());
        return Ok(BoardReading::not_found());
    };

    let geometry = reader.geometry(corners)?;
    let markers = marker_detector.detect_markers(image, &geometry.spacing);
    info!("detected {} markers", markers.len());
    Ok(reader.assign(geometry, markers))
}
