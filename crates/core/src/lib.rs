//! placard - continuous-scale label collision detection for map tiles.

pub mod collision;
pub mod error;
pub mod geom;
pub mod glyph;
pub mod rotation;
pub mod spatial;

pub use collision::CollisionIndex;
pub use error::{PlacementError, Result};
pub use geom::{Aabb, Bounded, Point};
pub use glyph::{GlyphBox, PlacedGlyph};
pub use rotation::{AngleRange, FixedOrientation, RotationSolver};
pub use spatial::SpatialIndex;
