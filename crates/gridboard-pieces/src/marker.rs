use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Name of a marker color class, e.g. `"red"` or `"blue"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorLabel(String);

impl ColorLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColorLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for ColorLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for ColorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One detected colored blob, in image pixel coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub color: ColorLabel,
    pub position: Point2<f32>,
}

impl Marker {
    pub fn new(color: impl Into<ColorLabel>, x: f32, y: f32) -> Self {
        Self {
            color: color.into(),
            position: Point2::new(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_json_uses_plain_label_and_point_array() {
        let m = Marker::new("red", 126.0, 124.5);
        let json = serde_json::to_string(&m).expect("serialize");
        assert_eq!(json, r#"{"color":"red","position":[126.0,124.5]}"#);
        let back: Marker = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, m);
    }
}
