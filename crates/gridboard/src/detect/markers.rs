use gridboard_lattice::SpacingStats;
use gridboard_pieces::{ColorLabel, Marker};
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::region_labelling::{connected_components, Connectivity};
use log::debug;
use palette::{FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};

use super::MarkerDetector;

/// Inclusive HSV box on the 8-bit scale: hue in `0..=179` (degrees / 2),
/// saturation and value in `0..=255`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    #[inline]
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| self.lower[i] <= hsv[i] && hsv[i] <= self.upper[i])
    }
}

/// One marker color: a label plus the HSV ranges that select it.
///
/// Several ranges are OR-ed together, which is how red wraps around hue 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorClass {
    pub label: ColorLabel,
    pub ranges: Vec<HsvRange>,
}

impl ColorClass {
    pub fn new(label: impl Into<ColorLabel>, ranges: Vec<HsvRange>) -> Self {
        Self {
            label: label.into(),
            ranges,
        }
    }

    pub fn blue() -> Self {
        Self::new("blue", vec![HsvRange::new([100, 150, 50], [140, 255, 255])])
    }

    pub fn red() -> Self {
        Self::new(
            "red",
            vec![
                HsvRange::new([0, 120, 70], [10, 255, 255]),
                HsvRange::new([170, 120, 70], [180, 255, 255]),
            ],
        )
    }

    #[inline]
    pub fn matches(&self, hsv: [u8; 3]) -> bool {
        self.ranges.iter().any(|r| r.contains(hsv))
    }
}

/// Settings for [`HsvMarkerDetector`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HsvMarkerParams {
    pub classes: Vec<ColorClass>,
    /// Blobs smaller than `cell_area / min_area_divisor` are noise.
    pub min_area_divisor: f32,
    /// Blobs larger than `cell_area + max_area_margin` are not pieces.
    pub max_area_margin: f32,
    /// Hard lower bound on blob size in pixels.
    pub min_pixels: u32,
}

impl Default for HsvMarkerParams {
    fn default() -> Self {
        Self {
            classes: vec![ColorClass::blue(), ColorClass::red()],
            min_area_divisor: 60.0,
            max_area_margin: 10.0,
            min_pixels: 5,
        }
    }
}

impl HsvMarkerParams {
    /// Accepted blob area range in pixels for a given grid pitch.
    pub fn area_band(&self, spacing: &SpacingStats) -> (f32, f32) {
        let cell_area = spacing.cell_area();
        (
            cell_area / self.min_area_divisor,
            cell_area + self.max_area_margin,
        )
    }
}

/// Convert an sRGB pixel to 8-bit HSV (hue halved to fit `0..=179`).
pub fn rgb_to_hsv(px: Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = px.0;
    let hsv: Hsv = Hsv::from_color(Srgb::new(r, g, b).into_format::<f32>());
    let hue = (hsv.hue.into_positive_degrees() / 2.0).round();
    // 359.x degrees rounds up to 180, which folds back onto red at 0.
    let hue = if hue >= 180.0 { 0.0 } else { hue };
    [
        hue as u8,
        (hsv.saturation * 255.0).round().clamp(0.0, 255.0) as u8,
        (hsv.value * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

/// Colored piece detector: HSV thresholds, 8-connected blobs, area filter.
///
/// Every accepted blob becomes one [`Marker`] at its pixel centroid.
#[derive(Clone, Debug, Default)]
pub struct HsvMarkerDetector {
    params: HsvMarkerParams,
}

#[derive(Clone, Copy, Default)]
struct BlobAccum {
    count: u32,
    sum_x: f64,
    sum_y: f64,
}

impl HsvMarkerDetector {
    pub fn new(params: HsvMarkerParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &HsvMarkerParams {
        &self.params
    }

    fn mask(hsv: &[[u8; 3]], width: u32, height: u32, class: &ColorClass) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            let idx = (y * width + x) as usize;
            Luma([if class.matches(hsv[idx]) { 255 } else { 0 }])
        })
    }

    fn blobs(&self, mask: &GrayImage, band: (f32, f32)) -> Vec<(f32, f32)> {
        let labels = connected_components(mask, Connectivity::Eight, Luma([0u8]));
        let mut accum: Vec<BlobAccum> = Vec::new();
        for (x, y, label) in labels.enumerate_pixels() {
            let id = label.0[0] as usize;
            if id == 0 {
                continue;
            }
            if accum.len() < id {
                accum.resize(id, BlobAccum::default());
            }
            let blob = &mut accum[id - 1];
            blob.count += 1;
            blob.sum_x += x as f64;
            blob.sum_y += y as f64;
        }

        let (min_area, max_area) = band;
        accum
            .into_iter()
            .filter(|b| {
                let area = b.count as f32;
                let keep =
                    b.count >= self.params.min_pixels && area >= min_area && area <= max_area;
                if !keep && b.count > 0 {
                    debug!(
                        "dropping blob of {} px (band {:.1}..{:.1})",
                        b.count, min_area, max_area
                    );
                }
                keep
            })
            .map(|b| {
                let n = b.count as f64;
                ((b.sum_x / n) as f32, (b.sum_y / n) as f32)
            })
            .collect()
    }
}

impl MarkerDetector for HsvMarkerDetector {
    fn detect_markers(&self, image: &RgbImage, spacing: &SpacingStats) -> Vec<Marker> {
        let (width, height) = image.dimensions();
        let hsv: Vec<[u8; 3]> = image.pixels().map(|p| rgb_to_hsv(*p)).collect();
        let band = self.params.area_band(spacing);

        let mut markers = Vec::new();
        for class in &self.params.classes {
            let mask = Self::mask(&hsv, width, height, class);
            let found = self.blobs(&mask, band);
            debug!("{} {} markers", found.len(), class.label);
            markers.extend(
                found
                    .into_iter()
                    .map(|(x, y)| Marker::new(class.label.clone(), x, y)),
            );
        }
        markers
    }
}
