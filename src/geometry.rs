//! Rectangle geometry and coordinate conversion
//!
//! The host keeps annotation geometry in top-left-origin coordinates
//! (Y grows downward) while the document engine uses bottom-left-origin
//! coordinates (Y grows upward). Conversion happens per call against the
//! page height; there is no cached transform state.

use mupdf::{Point, Quad, Rect};
use serde::{Deserialize, Serialize};

/// Per-coordinate tolerance when comparing re-derived geometry, in native
/// units. Round-tripped geometry is never bit-exact, so matching treats
/// positions closer than this as the same.
pub const MATCH_EPSILON: f64 = 1.0;

/// Axis-aligned rectangle in host coordinates (origin top-left, Y down).
///
/// Invariant: `x1 <= x2` and `y1 <= y2`; the constructor normalizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rectangle {
    /// Create a rectangle from two corner points, normalizing the corner
    /// order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Convert a native quadrilateral to a host rectangle.
    ///
    /// The quad is reduced to its axis-aligned bounding box in native
    /// space, then the Y axis is flipped against the page height. Width
    /// and height are preserved.
    pub fn from_quad(quad: &Quad, page_height: f64) -> Self {
        let bounds = quad_bounds(quad);
        Self {
            x1: bounds.x0 as f64,
            y1: page_height - bounds.y1 as f64,
            x2: bounds.x1 as f64,
            y2: page_height - bounds.y0 as f64,
        }
    }

    /// Convert back to an axis-aligned native quadrilateral.
    pub fn to_quad(&self, page_height: f64) -> Quad {
        let x1 = self.x1 as f32;
        let x2 = self.x2 as f32;
        let top = (page_height - self.y1) as f32;
        let bottom = (page_height - self.y2) as f32;

        Quad {
            ul: Point { x: x1, y: top },
            ur: Point { x: x2, y: top },
            ll: Point { x: x1, y: bottom },
            lr: Point { x: x2, y: bottom },
        }
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Whether a native quad matches this rectangle within `eps`.
    ///
    /// The quad is converted to host space with the same formula as
    /// [`Rectangle::from_quad`]; all four coordinate deltas must be below
    /// `eps`.
    pub fn matches_quad(&self, quad: &Quad, page_height: f64, eps: f64) -> bool {
        let candidate = Rectangle::from_quad(quad, page_height);
        (self.x1 - candidate.x1).abs() < eps
            && (self.y1 - candidate.y1).abs() < eps
            && (self.x2 - candidate.x2).abs() < eps
            && (self.y2 - candidate.y2).abs() < eps
    }
}

/// Axis-aligned bounding box of a quad in native space, tolerating
/// arbitrary corner winding.
pub fn quad_bounds(quad: &Quad) -> Rect {
    let xs = [quad.ul.x, quad.ur.x, quad.ll.x, quad.lr.x];
    let ys = [quad.ul.y, quad.ur.y, quad.ll.y, quad.lr.y];

    let mut bounds = Rect {
        x0: xs[0],
        y0: ys[0],
        x1: xs[0],
        y1: ys[0],
    };
    for i in 1..4 {
        bounds.x0 = bounds.x0.min(xs[i]);
        bounds.y0 = bounds.y0.min(ys[i]);
        bounds.x1 = bounds.x1.max(xs[i]);
        bounds.y1 = bounds.y1.max(ys[i]);
    }
    bounds
}

/// Union of the native-space bounding boxes of `quads`.
pub fn quads_bounds(quads: &[Quad]) -> Rect {
    let mut quads = quads.iter();
    let mut bounds = match quads.next() {
        Some(quad) => quad_bounds(quad),
        None => {
            return Rect {
                x0: 0.0,
                y0: 0.0,
                x1: 0.0,
                y1: 0.0,
            }
        }
    };

    for quad in quads {
        let b = quad_bounds(quad);
        bounds.x0 = bounds.x0.min(b.x0);
        bounds.y0 = bounds.y0.min(b.y0);
        bounds.x1 = bounds.x1.max(b.x1);
        bounds.y1 = bounds.y1.max(b.y1);
    }
    bounds
}

/// Host-space bounding box of a rectangle list. `None` for an empty list.
pub fn bounding_box(rects: &[Rectangle]) -> Option<Rectangle> {
    let mut rects = rects.iter();
    let first = *rects.next()?;
    Some(rects.fold(first, |acc, rect| acc.union(rect)))
}
