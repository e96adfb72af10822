//! Line bounding boxes placed inside the stacked document coordinate space.

use serde::{Deserialize, Serialize};

/// Trait for objects that have an axis-aligned bounding box.
///
/// Coordinates are image pixels with the origin at the top-left corner, so
/// `top <= bottom` for well-formed boxes.
pub trait HasBBox {
    fn left(&self) -> f64;
    fn top(&self) -> f64;
    fn right(&self) -> f64;
    fn bottom(&self) -> f64;

    fn width(&self) -> f64 {
        self.right() - self.left()
    }

    fn height(&self) -> f64 {
        self.bottom() - self.top()
    }

    fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

/// Wire form: `[[left, top], [right, bottom], [offset_left, offset_top]]`.
type PositionRepr = [[f64; 2]; 3];

/// A line's bounding box plus the offset of the page it was recognized on.
///
/// The box is page-local; the offset places the page inside the taller
/// composite image built by stacking every page vertically. Frame-side boxes
/// carry a zero offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "PositionRepr", into = "PositionRepr")]
pub struct LinePositionWithPageOffset {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    offset_left: f64,
    offset_top: f64,
}

impl LinePositionWithPageOffset {
    /// Creates a box with no page offset.
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            offset_left: 0.0,
            offset_top: 0.0,
        }
    }

    /// Returns a copy of this box placed on a page at the given offset.
    pub const fn with_page_offset(self, offset_left: f64, offset_top: f64) -> Self {
        Self {
            offset_left,
            offset_top,
            ..self
        }
    }

    pub const fn offset_left(&self) -> f64 {
        self.offset_left
    }

    pub const fn offset_top(&self) -> f64 {
        self.offset_top
    }

    /// `(left, top, right, bottom)` translated into document space.
    pub fn document_rect(&self) -> (f64, f64, f64, f64) {
        (
            self.offset_left + self.left,
            self.offset_top + self.top,
            self.offset_left + self.right,
            self.offset_top + self.bottom,
        )
    }
}

impl HasBBox for LinePositionWithPageOffset {
    fn left(&self) -> f64 {
        self.left
    }
    fn top(&self) -> f64 {
        self.top
    }
    fn right(&self) -> f64 {
        self.right
    }
    fn bottom(&self) -> f64 {
        self.bottom
    }
}

impl From<PositionRepr> for LinePositionWithPageOffset {
    fn from(repr: PositionRepr) -> Self {
        let [[left, top], [right, bottom], [offset_left, offset_top]] = repr;
        Self {
            left,
            top,
            right,
            bottom,
            offset_left,
            offset_top,
        }
    }
}

impl From<LinePositionWithPageOffset> for PositionRepr {
    fn from(pos: LinePositionWithPageOffset) -> Self {
        [
            [pos.left, pos.top],
            [pos.right, pos.bottom],
            [pos.offset_left, pos.offset_top],
        ]
    }
}
