use thiserror::Error;

/// Top-level error type for the oricut engine.
#[derive(Debug, Error)]
pub enum OricutError {
    #[error(transparent)]
    Ring(#[from] RingError),

    #[error(transparent)]
    Skeleton(#[from] SkeletonError),
}

/// Errors raised while extracting polygon rings from a scene.
///
/// Ring errors are deterministic: retrying with unchanged input repeats
/// the failure, so nothing is retried automatically.
#[derive(Debug, Error)]
pub enum RingError {
    #[error("scene contains no closed polygon")]
    NoClosedPolygon,

    #[error("shape {shape} has fewer than 3 distinct vertices")]
    DegenerateRing { shape: String },

    #[error("shape {shape} is self-intersecting")]
    SelfIntersectingRing { shape: String },

    #[error("{count} ring(s) lie outside the outer boundary; only one outer ring plus nested holes is supported")]
    MultipleDisjointOuterRings { count: usize },
}

/// Errors raised by the straight-skeleton solver.
#[derive(Debug, Error)]
pub enum SkeletonError {
    #[error("straight-skeleton computation failed: {0}")]
    ComputationFailed(String),
}

/// Convenience type alias for results using [`OricutError`].
pub type Result<T> = std::result::Result<T, OricutError>;
