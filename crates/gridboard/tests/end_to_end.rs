use approx::assert_relative_eq;
use gridboard::pipeline::{BoardReader, ReaderParams};
use gridboard::{BoardSpec, CellCoords, Marker, PieceAssignment};
use nalgebra::Point2;
use serde_json::json;

fn reference_corners(spec: BoardSpec) -> Vec<Point2<f32>> {
    let side = spec.interior_side();
    (0..side * side)
        .map(|k| Point2::new(100.0 + 50.0 * (k % side) as f32, 100.0 + 50.0 * (k / side) as f32))
        .collect()
}

#[test]
fn reference_board_reads_one_red_piece() {
    let spec = BoardSpec::default();
    let reader = BoardReader::new(spec, ReaderParams::default());
    let reading = reader
        .read(Some(reference_corners(spec)), &[Marker::new("red", 126.0, 124.0)])
        .expect("reading");

    let geometry = reading.geometry.as_ref().expect("board found");
    let p = geometry.lattice.get(0, 0);
    assert_relative_eq!(p.x, 50.0, epsilon = 1e-4);
    assert_relative_eq!(p.y, 50.0, epsilon = 1e-4);
    let c = geometry.centers.get(CellCoords::new(1, 1));
    assert_relative_eq!(c.x, 125.0, epsilon = 1e-4);
    assert_relative_eq!(c.y, 125.0, epsilon = 1e-4);

    let pieces: Vec<_> = reading.pieces.iter().cloned().collect();
    assert_eq!(pieces, vec![PieceAssignment::new("red", 1, 1)]);

    let state = reading.to_state();
    let value: serde_json::Value =
        serde_json::from_str(&state.to_json_string().expect("json")).expect("parse");
    assert_eq!(value["pieces"], json!([["red", [1, 1]]]));
    assert!(value["timestamp"].as_str().is_some_and(|t| t.contains('T')));
}

#[test]
fn undetected_board_reads_empty() {
    let reader = BoardReader::default();
    let reading = reader
        .read(None, &[Marker::new("blue", 10.0, 10.0)])
        .expect("reading");
    assert!(!reading.board_found());
    assert!(reading.pieces.is_empty());
    assert!(reading.to_state().pieces.is_empty());
}

#[test]
fn markers_outside_the_board_are_dropped() {
    let spec = BoardSpec::default();
    let reader = BoardReader::new(spec, ReaderParams::default());
    let markers = [
        Marker::new("blue", 775.0, 775.0),
        Marker::new("blue", 2000.0, 2000.0),
        Marker::new("red", 76.0, 74.0),
    ];
    let reading = reader.read(Some(reference_corners(spec)), &markers).expect("reading");

    let pieces: Vec<_> = reading.pieces.iter().cloned().collect();
    assert_eq!(
        pieces,
        vec![
            PieceAssignment::new("blue", 14, 14),
            PieceAssignment::new("red", 0, 0),
        ]
    );
    assert_eq!(reading.matches.len(), 3);
    assert!(!reading.matches[1].accepted);
}

#[cfg(feature = "image")]
mod photo {
    use super::*;
    use gridboard::detect::{read_board_image, HsvMarkerDetector, InteriorCornerDetector};
    use image::{GrayImage, Rgb, RgbImage};

    /// Stands in for a corner detector that already knows where the grid is.
    struct KnownCorners(Vec<Point2<f32>>);

    impl InteriorCornerDetector for KnownCorners {
        fn detect_interior_corners(
            &self,
            _image: &GrayImage,
            _spec: BoardSpec,
        ) -> Option<Vec<Point2<f32>>> {
            Some(self.0.clone())
        }
    }

    struct NoBoard;

    impl InteriorCornerDetector for NoBoard {
        fn detect_interior_corners(&self, _: &GrayImage, _: BoardSpec) -> Option<Vec<Point2<f32>>> {
            None
        }
    }

    fn paint_disk(img: &mut RgbImage, cx: i32, cy: i32, r: i32, color: [u8; 3]) {
        for y in cy - r..=cy + r {
            for x in cx - r..=cx + r {
                if (x - cx).pow(2) + (y - cy).pow(2) <= r * r {
                    img.put_pixel(x as u32, y as u32, Rgb(color));
                }
            }
        }
    }

    #[test]
    fn photo_pipeline_assigns_painted_pieces() {
        let spec = BoardSpec::default();
        let mut img = RgbImage::from_pixel(800, 800, Rgb([235, 225, 200]));
        paint_disk(&mut img, 126, 124, 14, [210, 25, 25]);
        paint_disk(&mut img, 375, 425, 14, [25, 45, 210]);

        let reader = BoardReader::new(spec, ReaderParams::default());
        let reading = read_board_image(
            &img,
            &KnownCorners(reference_corners(spec)),
            &HsvMarkerDetector::default(),
            &reader,
        )
        .expect("reading");

        let pieces: Vec<_> = reading.pieces.iter().cloned().collect();
        assert_eq!(
            pieces,
            vec![
                PieceAssignment::new("blue", 7, 6),
                PieceAssignment::new("red", 1, 1),
            ]
        );
    }

    #[test]
    fn photo_without_board_yields_no_pieces() {
        let mut img = RgbImage::from_pixel(200, 200, Rgb([235, 225, 200]));
        paint_disk(&mut img, 100, 100, 14, [210, 25, 25]);
        let reading = read_board_image(
            &img,
            &NoBoard,
            &HsvMarkerDetector::default(),
            &BoardReader::default(),
        )
        .expect("reading");
        assert!(!reading.board_found());
        assert!(reading.markers.is_empty());
        assert!(reading.pieces.is_empty());
    }
}
