use crate::math::Point2;

/// User-authored geometry: an ordered point sequence plus a closed flag.
///
/// Closure is implicit: the point list never repeats the first vertex at
/// the end. A closed shape with enough distinct vertices is a candidate
/// polygon ring for the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub points: Vec<Point2>,
    pub closed: bool,
}

impl Shape {
    /// Creates a new shape.
    #[must_use]
    pub fn new(points: Vec<Point2>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Creates a closed polygon shape.
    #[must_use]
    pub fn closed_polygon(points: Vec<Point2>) -> Self {
        Self::new(points, true)
    }

    /// Creates an open path shape (never a ring candidate).
    #[must_use]
    pub fn open_path(points: Vec<Point2>) -> Self {
        Self::new(points, false)
    }

    /// Whether this shape is eligible for ring extraction: closed with
    /// more than one point. Vertex-count and simplicity validation happen
    /// later, after duplicate collapse.
    #[must_use]
    pub fn is_ring_candidate(&self) -> bool {
        self.closed && self.points.len() > 1
    }
}
