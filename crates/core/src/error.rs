//! Error types for placard collision index construction.

use thiserror::Error;

/// Construction-time validation error for [`crate::CollisionIndex`].
///
/// Placement rejection is *not* an error; it is the `None` arm of
/// `placement_scale`. These variants only report invalid tile geometry
/// passed to `CollisionIndex::new`.
#[derive(Error, Debug)]
pub enum PlacementError {
    #[error("invalid zoom: {0}")]
    InvalidZoom(f64),

    #[error("invalid extent: {0}")]
    InvalidExtent(f64),

    #[error("invalid tile size: {0}")]
    InvalidTileSize(f64),
}

/// Convenience `Result` type alias for [`PlacementError`].
pub type Result<T> = std::result::Result<T, PlacementError>;
