//! Debug rendering of a [`BoardReading`] on top of the source photo.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_filled_circle_mut, draw_line_segment_mut};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::pipeline::BoardReading;

/// Colors and sizes used by [`draw_reading`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub corner_color: [u8; 3],
    pub center_color: [u8; 3],
    pub marker_color: [u8; 3],
    pub match_color: [u8; 3],
    pub dot_radius: i32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            corner_color: [0, 200, 0],
            center_color: [255, 255, 0],
            marker_color: [0, 255, 255],
            match_color: [255, 0, 255],
            dot_radius: 5,
        }
    }
}

fn ipt(p: Point2<f32>) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

/// Draw lattice corners, cell centers and accepted marker-to-center links.
///
/// A reading without geometry leaves the image untouched.
pub fn draw_reading(image: &mut RgbImage, reading: &BoardReading, style: &OverlayStyle) {
    let Some(geometry) = &reading.geometry else {
        return;
    };

    for &p in geometry.lattice.points() {
        let (x, y) = ipt(p);
        draw_cross_mut(image, Rgb(style.corner_color), x, y);
    }
    for &c in geometry.centers.centers() {
        draw_filled_circle_mut(image, ipt(c), 1, Rgb(style.center_color));
    }

    for m in reading.matches.iter().filter(|m| m.accepted) {
        let (Some(nearest), Some(marker)) = (&m.nearest, reading.markers.get(m.marker_index))
        else {
            continue;
        };
        draw_line_segment_mut(
            image,
            (marker.position.x, marker.position.y),
            (nearest.center.x, nearest.center.y),
            Rgb(style.match_color),
        );
        draw_filled_circle_mut(
            image,
            ipt(marker.position),
            style.dot_radius,
            Rgb(style.marker_color),
        );
        draw_filled_circle_mut(
            image,
            ipt(nearest.center),
            style.dot_radius,
            Rgb(style.center_color),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::BoardReader;
    use gridboard_core::BoardSpec;
    use gridboard_pieces::Marker;

    fn reading() -> BoardReading {
        let spec = BoardSpec::new(5).unwrap();
        let side = spec.interior_side();
        let corners = (0..side * side)
            .map(|k| Point2::new(40.0 + 20.0 * (k % side) as f32, 40.0 + 20.0 * (k / side) as f32))
            .collect();
        let reader = BoardReader::new(spec, Default::default());
        reader
            .read(Some(corners), &[Marker::new("red", 57.0, 43.0)])
            .unwrap()
    }

    #[test]
    fn marks_marker_and_matched_center() {
        let mut img = RgbImage::new(160, 160);
        let style = OverlayStyle::default();
        draw_reading(&mut img, &reading(), &style);

        assert_eq!(img.get_pixel(60, 40), &Rgb(style.marker_color));
        // Cell (1, 1) spans lattice corners (40, 40) .. (60, 60).
        assert_eq!(img.get_pixel(50, 54), &Rgb(style.center_color));
        assert_eq!(img.get_pixel(20, 20), &Rgb(style.corner_color));
    }

    #[test]
    fn missing_geometry_draws_nothing() {
        let mut img = RgbImage::new(32, 32);
        draw_reading(&mut img, &BoardReading::not_found(), &OverlayStyle::default());
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0]));
    }
}
