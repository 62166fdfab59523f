//! Rotation intervals and the rotation-overlap solver seam.

use std::f64::consts::TAU;

use crate::glyph::{GlyphBox, PlacedGlyph};

/// An angular interval `[min, max]` in radians.
///
/// The empty interval is `[2π, 0]`; unioning only ever widens it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleRange {
    pub min: f64,
    pub max: f64,
}

impl AngleRange {
    pub fn empty() -> Self {
        Self { min: TAU, max: 0.0 }
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Unions another interval into this one.
    pub fn widen(&mut self, other: &AngleRange) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }
}

/// Solves the angular interval over which rotating a candidate glyph
/// through that arc makes it intersect a placed glyph at the given scale.
///
/// The solver itself lives with the curved-label layout machinery; the
/// collision engine only forwards pairs that survive the rescaled AABB
/// pre-check.
pub trait RotationSolver {
    fn rotation_range(&self, glyph: &GlyphBox, placed: &PlacedGlyph, scale: f64) -> AngleRange;
}

/// Solver for callers whose labels are never rotated: every pair yields
/// the empty interval.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOrientation;

impl RotationSolver for FixedOrientation {
    fn rotation_range(&self, _glyph: &GlyphBox, _placed: &PlacedGlyph, _scale: f64) -> AngleRange {
        AngleRange::empty()
    }
}
