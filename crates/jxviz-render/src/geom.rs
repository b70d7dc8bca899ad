use serde::{Deserialize, Serialize};

/// Position relative to a node's bounding box: `(0, 0)` is the top-left, `(1, 1)` the
/// bottom-right corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel insets around an annotation or icon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margin {
    pub fn left(left: f64) -> Self {
        Self {
            left,
            ..Self::default()
        }
    }

    pub fn right(right: f64) -> Self {
        Self {
            right,
            ..Self::default()
        }
    }
}
