pub mod intersect_2d;
pub mod polygon_2d;
pub mod snap_2d;
pub mod vector_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Consecutive vertices closer than this collapse into one during ring cleanup.
pub const DUPLICATE_TOLERANCE: f64 = 1e-9;

/// Below this length, [`vector_2d::normalize_or_zero`] returns the zero vector.
pub const NORMALIZE_FLOOR: f64 = 1e-12;

/// Absolute polygon areas below this are treated as degenerate (zero-area).
pub const DEGENERATE_AREA: f64 = 1e-12;

/// Collapse times within this of zero mark original boundary vertices.
pub const EPS_TIME: f64 = 1e-7;

/// Squared length below which a skeleton edge is treated as degenerate.
pub const DEGENERATE_EDGE_SQ: f64 = 1e-10;

/// Snapping tolerance for crease deduplication keys.
pub const SNAP_TOLERANCE: f64 = 1e-2;

/// Ray parameters below this are discarded as self-hits at the ray origin.
pub const RAY_SELF_HIT: f64 = 1e-6;
