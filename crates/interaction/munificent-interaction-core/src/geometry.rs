//! Plain 2D geometry shared by pointer math and the cursor overlay.

use serde::{Deserialize, Serialize};

/// Viewport-space point in CSS pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Bounding rectangle as reported by `getBoundingClientRect`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// False for elements that are not laid out yet (zero width) or carry
    /// non-finite geometry; horizontal ratios are undefined for those.
    #[inline]
    pub fn has_usable_width(&self) -> bool {
        self.left.is_finite() && self.width.is_finite() && self.width > 0.0
    }
}
