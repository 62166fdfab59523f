//! Glyph collision boxes: candidate input and indexed placement entries.

use crate::geom::{Aabb, Bounded, Point};
use crate::rotation::AngleRange;

/// One glyph of a candidate label.
///
/// `bounds` is the collision box relative to the anchor; `h_bounds`, when
/// present, is an alternate horizontal-readout box used for index queries
/// and committed placement, while scale thresholds are always solved
/// against `bounds`. The `[min_scale, max_scale)` interval is the scale
/// range in which the glyph exists at all.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphBox {
    pub bounds: Aabb,
    pub h_bounds: Option<Aabb>,
    pub anchor: Point,
    /// Extra clearance around the glyph, in screen pixels.
    pub padding: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl GlyphBox {
    /// Creates a glyph box with no padding and an unbounded scale range.
    pub fn new(bounds: Aabb, anchor: Point) -> Self {
        Self {
            bounds,
            h_bounds: None,
            anchor,
            padding: 0.0,
            min_scale: 0.0,
            max_scale: f64::INFINITY,
        }
    }

    /// The box used for index queries and committed placement.
    pub fn query_bounds(&self) -> &Aabb {
        self.h_bounds.as_ref().unwrap_or(&self.bounds)
    }
}

/// A glyph committed to a spatial index.
///
/// Carries the absolute box it is indexed under plus the metadata needed
/// to solve scale thresholds and rotation ranges against it later.
#[derive(Debug, Clone)]
pub struct PlacedGlyph {
    bounds: Aabb,
    anchor: Point,
    rel_bounds: Aabb,
    h_bounds: Option<Aabb>,
    range: AngleRange,
    scale: f64,
    max_scale: f64,
    padding: f64,
}

impl PlacedGlyph {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        bounds: Aabb,
        anchor: Point,
        rel_bounds: Aabb,
        h_bounds: Option<Aabb>,
        range: AngleRange,
        scale: f64,
        max_scale: f64,
        padding: f64,
    ) -> Self {
        Self {
            bounds,
            anchor,
            rel_bounds,
            h_bounds,
            range,
            scale,
            max_scale,
            padding,
        }
    }

    /// The anchor the label was committed at.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// The anchor-relative collision box.
    pub fn rel_bounds(&self) -> &Aabb {
        &self.rel_bounds
    }

    /// The horizontal-readout box, if the glyph carried one.
    pub fn h_bounds(&self) -> Option<&Aabb> {
        self.h_bounds.as_ref()
    }

    /// The box used for rescaled overlap checks (`h_bounds` if present).
    pub fn query_bounds(&self) -> &Aabb {
        self.h_bounds.as_ref().unwrap_or(&self.rel_bounds)
    }

    /// The angular interval the label occupies.
    pub fn range(&self) -> AngleRange {
        self.range
    }

    /// The placement scale the glyph was committed at.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The scale beyond which the glyph no longer exists.
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Clearance around the glyph, in screen pixels.
    pub fn padding(&self) -> f64 {
        self.padding
    }
}

impl Bounded for PlacedGlyph {
    fn bounds(&self) -> Aabb {
        self.bounds
    }
}
