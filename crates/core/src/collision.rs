//! Tile-scoped collision index for label placement.
//!
//! One `CollisionIndex` lives for exactly one tile's placement pass. Per
//! candidate label the caller runs, in order:
//! - `placement_scale`: the smallest scale at which every glyph box is
//!   collision-free against everything already indexed
//! - `placement_range`: the union of rotation intervals the label must
//!   avoid at that scale
//! - `insert`: commits the glyph boxes into the horizontal or curved index
//!
//! Rejection at any stage discards the label for this tile. The index only
//! grows; entries are never removed or mutated.

use crate::error::{PlacementError, Result};
use crate::geom::{Aabb, Bounded, Point};
use crate::glyph::{GlyphBox, PlacedGlyph};
use crate::rotation::{AngleRange, RotationSolver};
use crate::spatial::SpatialIndex;

/// The minimum placement zoom is stored as an unsigned integer x10, so the
/// deepest representable value is 25.5.
const MAX_ENCODABLE_ZOOM: f64 = 25.5;

/// Cap on how far past the tile's own zoom a placement may be pushed.
/// Deeper placements let too many low-importance labels through and slow
/// down collision checking.
const MAX_PLACEMENT_DEPTH: f64 = 3.0;

pub struct CollisionIndex {
    /// Index for straight/horizontal labels
    horizontal: SpatialIndex<PlacedGlyph>,
    /// Index for glyphs belonging to curved labels
    curved: SpatialIndex<PlacedGlyph>,
    /// Tile units per screen pixel at the tile's zoom level
    tile_pixel_ratio: f64,
    zoom: f64,
    max_placement_scale: f64,
    extent: f64,
}

impl CollisionIndex {
    /// Creates the collision index for one tile and seeds the corner
    /// fences.
    ///
    /// `extent` is the tile coordinate range (4096 for standard vector
    /// tiles) and `tile_size` the tile's screen size in pixels.
    pub fn new(zoom: f64, extent: f64, tile_size: f64) -> Result<Self> {
        if !zoom.is_finite() {
            return Err(PlacementError::InvalidZoom(zoom));
        }
        if !(extent > 0.0) {
            return Err(PlacementError::InvalidExtent(extent));
        }
        if !(tile_size > 0.0) {
            return Err(PlacementError::InvalidTileSize(tile_size));
        }

        let zoom = zoom - (256.0 / tile_size).log2();
        let mut index = Self {
            horizontal: SpatialIndex::new(),
            curved: SpatialIndex::new(),
            tile_pixel_ratio: extent / tile_size,
            zoom,
            max_placement_scale: (MAX_ENCODABLE_ZOOM - zoom).min(MAX_PLACEMENT_DEPTH).exp2(),
            extent,
        };
        index.seed_fences();
        Ok(index)
    }

    /// Walls off the tile edges with oversized boxes so that a label close
    /// to an edge collides against the fence instead of being placed, and
    /// therefore cannot appear duplicated on the adjacent tile.
    fn seed_fences(&mut self) {
        let edge = self.extent * self.tile_pixel_ratio * 2.0;
        let fence = |bounds: Aabb, anchor: Point| GlyphBox {
            padding: 2.0,
            ..GlyphBox::new(bounds, anchor)
        };

        let origin = Point::new(0.0, 0.0);
        let far = Point::new(self.extent, self.extent);
        // Left and top walls, anchored at the origin corner.
        let near_pair = [
            fence(Aabb::new(-edge, -edge, 0.0, edge), origin),
            fence(Aabb::new(-edge, -edge, edge, 0.0), origin),
        ];
        // Bottom and right walls, anchored at the opposite corner.
        let far_pair = [
            fence(Aabb::new(-edge, 0.0, edge, edge), far),
            fence(Aabb::new(0.0, -edge, edge, edge), far),
        ];

        for horizontal in [true, false] {
            self.insert(&near_pair, origin, 1.0, AngleRange::empty(), horizontal);
            self.insert(&far_pair, far, 1.0, AngleRange::empty(), horizontal);
        }
    }

    /// Computes the smallest placement scale, at least
    /// `min_placement_scale`, at which every glyph of the label is
    /// collision-free against both indices.
    ///
    /// Returns `None` when the label cannot be placed in this tile: a
    /// glyph anchor is outside the tile, a blocker shares the candidate's
    /// exact anchor, or the required scale exceeds the tile's placement
    /// ceiling.
    pub fn placement_scale(
        &self,
        glyphs: &[GlyphBox],
        mut min_placement_scale: f64,
    ) -> Option<f64> {
        for glyph in glyphs {
            let anchor = glyph.anchor;
            if anchor.x < 0.0 || anchor.x > self.extent || anchor.y < 0.0 || anchor.y > self.extent
            {
                return None;
            }

            let min_scale = min_placement_scale.max(glyph.min_scale);
            let max_scale = glyph.max_scale;
            // A glyph whose scale interval is empty contributes no
            // constraint.
            if min_scale >= max_scale {
                continue;
            }

            let query = glyph.query_bounds().project(anchor, min_scale);
            let blocking = self.horizontal.search(&query);
            let blocking = blocking.into_iter().chain(self.curved.search(&query));

            for (_, blocker) in blocking {
                // Two labels sharing an anchor point are never allowed to
                // coexist, even though their box offsets could differ.
                // Acknowledged simplification, kept for product review.
                if blocker.anchor() == anchor {
                    return None;
                }

                // Padding is stored in screen pixels; convert to tile
                // units before solving.
                let padding = glyph.padding.max(blocker.padding()) * self.tile_pixel_ratio;

                let nb = &glyph.bounds;
                let ob = blocker.rel_bounds();
                let delta_x = anchor.x - blocker.anchor().x;
                let delta_y = anchor.y - blocker.anchor().y;

                // Scale thresholds at which the candidate clears the
                // blocker on each side of each axis.
                let (s1, s2) = side_thresholds(
                    ob.x1 - nb.x2 - padding,
                    ob.x2 - nb.x1 + padding,
                    delta_x,
                );
                let (s3, s4) = side_thresholds(
                    ob.y1 - nb.y2 - padding,
                    ob.y2 - nb.y1 + padding,
                    delta_y,
                );

                // Clearing one axis ends the overlap: take the scale at
                // which each axis clears (the larger side threshold
                // suffices) and the earlier of the two axes.
                let collision_free_scale = s1.max(s2).min(s3.max(s4));

                // Only raise the floor if the glyph was restricted by the
                // collision within its own scale interval, and the blocker
                // still exists at the new scale.
                if collision_free_scale > min_placement_scale
                    && collision_free_scale > min_scale
                    && collision_free_scale < max_scale
                    && collision_free_scale < blocker.max_scale()
                {
                    min_placement_scale = collision_free_scale;
                }

                if min_placement_scale > self.max_placement_scale {
                    return None;
                }
            }
        }

        Some(min_placement_scale)
    }

    /// Computes the union of rotation intervals the label must avoid at
    /// `placement_scale`. The curved index is always consulted; the
    /// horizontal index additionally when the label itself is horizontal.
    pub fn placement_range(
        &self,
        glyphs: &[GlyphBox],
        placement_scale: f64,
        horizontal: bool,
        solver: &dyn RotationSolver,
    ) -> AngleRange {
        let mut range = AngleRange::empty();

        for glyph in glyphs {
            let placed = glyph.query_bounds().project(glyph.anchor, placement_scale);

            let mut blocking = self.curved.search(&placed);
            if horizontal {
                blocking.extend(self.horizontal.search(&placed));
            }

            for (_, blocker) in blocking {
                // Boxes committed at different scales are not directly
                // comparable: reproject the box recorded at the smaller
                // scale into the other's scale space before the cheap
                // overlap check.
                let overlap = if placement_scale > blocker.scale() {
                    let other = blocker
                        .query_bounds()
                        .project(blocker.anchor(), placement_scale);
                    other.overlaps(&placed)
                } else {
                    let own = glyph.query_bounds().project(glyph.anchor, blocker.scale());
                    own.overlaps(&blocker.bounds())
                };
                if !overlap {
                    continue;
                }

                let scale = placement_scale.max(blocker.scale());
                range.widen(&solver.rotation_range(glyph, blocker, scale));
            }
        }

        range
    }

    /// Commits a label's glyph boxes into the horizontal or curved index
    /// as one batch.
    ///
    /// Every box is projected around the label `anchor` at the larger of
    /// `placement_scale` and the glyph's own minimum scale.
    pub fn insert(
        &mut self,
        glyphs: &[GlyphBox],
        anchor: Point,
        placement_scale: f64,
        placement_range: AngleRange,
        horizontal: bool,
    ) {
        let mut batch = Vec::with_capacity(glyphs.len());

        for glyph in glyphs {
            let scale = placement_scale.max(glyph.min_scale);
            let bounds = glyph.query_bounds().project(anchor, scale);
            batch.push(PlacedGlyph::new(
                bounds,
                anchor,
                glyph.bounds,
                glyph.h_bounds,
                placement_range,
                scale,
                glyph.max_scale,
                glyph.padding,
            ));
        }

        let index = if horizontal {
            &mut self.horizontal
        } else {
            &mut self.curved
        };
        index.extend(batch);
    }

    /// Effective zoom of the tile, adjusted for its screen size.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Hard ceiling on computed placement scales for this tile.
    pub fn max_placement_scale(&self) -> f64 {
        self.max_placement_scale
    }

    /// The tile coordinate range.
    pub fn extent(&self) -> f64 {
        self.extent
    }
}

/// Scale thresholds at which the candidate box clears the blocker box on
/// the low and high side of one axis, given the anchor separation along
/// that axis.
///
/// With zero separation, scaling never moves the boxes apart along this
/// axis: each threshold becomes an infinity carrying its numerator's sign,
/// so the pair defers to the other axis. A zero numerator on top of zero
/// separation has no usable threshold at all and collapses the pair to the
/// neutral scale 1.
fn side_thresholds(lo: f64, hi: f64, delta: f64) -> (f64, f64) {
    if delta != 0.0 {
        (lo / delta, hi / delta)
    } else if lo == 0.0 || hi == 0.0 {
        (1.0, 1.0)
    } else {
        (f64::INFINITY.copysign(lo), f64::INFINITY.copysign(hi))
    }
}
