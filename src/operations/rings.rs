use tracing::debug;

use crate::error::RingError;
use crate::math::polygon_2d::{
    centroid_2d, collapse_duplicates_2d, ensure_ccw, ensure_cw, is_simple_polygon_2d,
    point_in_polygon_2d, signed_area_2d,
};
use crate::math::{Point2, DUPLICATE_TOLERANCE};
use crate::scene::{Scene, ShapeKey};
use crate::Result;

/// A validated polygon ring in implicit-closure form.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub points: Vec<Point2>,
    pub area: f64,
    pub centroid: Point2,
}

impl Ring {
    fn from_points(points: Vec<Point2>) -> Self {
        let area = signed_area_2d(&points);
        let centroid = centroid_2d(&points);
        Self {
            points,
            area,
            centroid,
        }
    }

    /// The ring's vertices with the first vertex repeated at the end,
    /// the boundary format skeleton solvers expect.
    #[must_use]
    pub fn closed_coordinates(&self) -> Vec<Point2> {
        let mut out = self.points.clone();
        if let Some(&first) = out.first() {
            out.push(first);
        }
        out
    }
}

/// One outer boundary (counter-clockwise) plus its holes (clockwise).
#[derive(Debug, Clone, PartialEq)]
pub struct RingSet {
    pub outer: Ring,
    pub holes: Vec<Ring>,
}

impl RingSet {
    /// All rings in explicit-closure form, outer first.
    #[must_use]
    pub fn closed_coordinates(&self) -> Vec<Vec<Point2>> {
        let mut out = Vec::with_capacity(1 + self.holes.len());
        out.push(self.outer.closed_coordinates());
        for hole in &self.holes {
            out.push(hole.closed_coordinates());
        }
        out
    }
}

/// Extracts a normalized [`RingSet`] from the closed shapes of a scene.
///
/// Every closed shape is cleaned (near-duplicate vertices collapsed) and
/// validated (vertex count, simplicity). One shape becomes the outer
/// boundary: the caller's preferred shape when it is a valid candidate,
/// otherwise the ring with the largest absolute area. Every other ring
/// must nest inside it (classified by centroid containment) and becomes
/// a hole. The outer ring is oriented counter-clockwise, holes clockwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingBuild {
    preferred_outer: Option<ShapeKey>,
}

impl RingBuild {
    /// Creates a ring build with automatic outer selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a specific shape as the outer boundary. Ignored when the
    /// shape is absent or not a valid ring candidate.
    #[must_use]
    pub fn with_preferred_outer(key: ShapeKey) -> Self {
        Self {
            preferred_outer: Some(key),
        }
    }

    /// Runs ring extraction over `scene`.
    ///
    /// # Errors
    ///
    /// - [`RingError::NoClosedPolygon`] when no closed shape exists.
    /// - [`RingError::DegenerateRing`] when a closed shape has fewer than
    ///   3 distinct vertices after duplicate collapse.
    /// - [`RingError::SelfIntersectingRing`] when a ring self-intersects.
    /// - [`RingError::MultipleDisjointOuterRings`] when rings lie outside
    ///   the chosen outer boundary.
    pub fn execute(&self, scene: &Scene) -> Result<RingSet> {
        let mut candidates: Vec<(ShapeKey, Vec<Point2>)> = Vec::new();
        for (key, shape) in scene.iter() {
            if !shape.is_ring_candidate() {
                continue;
            }
            let cleaned = collapse_duplicates_2d(&shape.points, DUPLICATE_TOLERANCE);
            if cleaned.len() < 3 {
                return Err(RingError::DegenerateRing {
                    shape: format!("{key:?}"),
                }
                .into());
            }
            if !is_simple_polygon_2d(&cleaned) {
                return Err(RingError::SelfIntersectingRing {
                    shape: format!("{key:?}"),
                }
                .into());
            }
            candidates.push((key, cleaned));
        }
        if candidates.is_empty() {
            return Err(RingError::NoClosedPolygon.into());
        }

        let outer_idx = self.pick_outer(&candidates);
        let outer_points = candidates[outer_idx].1.clone();

        let mut holes = Vec::new();
        let mut outside = 0usize;
        for (i, (_, points)) in candidates.iter().enumerate() {
            if i == outer_idx {
                continue;
            }
            if point_in_polygon_2d(centroid_2d(points), &outer_points) {
                holes.push(Ring::from_points(ensure_cw(points)));
            } else {
                outside += 1;
            }
        }
        if outside > 0 {
            return Err(RingError::MultipleDisjointOuterRings { count: outside }.into());
        }

        debug!(rings = candidates.len(), holes = holes.len(), "ring set built");
        Ok(RingSet {
            outer: Ring::from_points(ensure_ccw(&outer_points)),
            holes,
        })
    }

    fn pick_outer(&self, candidates: &[(ShapeKey, Vec<Point2>)]) -> usize {
        if let Some(preferred) = self.preferred_outer {
            if let Some(i) = candidates.iter().position(|(key, _)| *key == preferred) {
                return i;
            }
        }
        let mut best = 0;
        let mut best_area = signed_area_2d(&candidates[0].1).abs();
        for (i, (_, points)) in candidates.iter().enumerate().skip(1) {
            let area = signed_area_2d(points).abs();
            if area > best_area {
                best = i;
                best_area = area;
            }
        }
        best
    }
}
