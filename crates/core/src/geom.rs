//! Geometric types for tile-space collision detection.
//!
//! Provides:
//! - Point: a 2D point in tile coordinates with value equality
//! - Aabb: an axis-aligned box, either relative to a label anchor or
//!   absolute in tile space after projection at a placement scale
//! - Bounded: trait for objects that expose an absolute bounding box

/// A 2D point in tile coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box.
///
/// Glyph boxes are stored relative to their label anchor and only become
/// absolute tile-space boxes once projected at a placement scale; the same
/// relative box shrinks toward its anchor as the scale grows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Aabb {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Projects a relative box to absolute tile coordinates at the given
    /// placement scale: each corner is scaled down by `1/scale` and offset
    /// by the anchor.
    pub fn project(&self, anchor: Point, scale: f64) -> Aabb {
        Aabb {
            x1: anchor.x + self.x1 / scale,
            y1: anchor.y + self.y1 / scale,
            x2: anchor.x + self.x2 / scale,
            y2: anchor.y + self.y2 / scale,
        }
    }

    /// Returns true if the boxes share any area or touch along an edge.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    /// Returns true if the boxes share interior area. Touching edges do
    /// not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x1 < other.x2 && self.x2 > other.x1 && self.y1 < other.y2 && self.y2 > other.y1
    }
}

/// Trait for objects stored in a spatial index.
pub trait Bounded {
    /// The absolute tile-space bounding box under which the object is
    /// indexed.
    fn bounds(&self) -> Aabb;
}
