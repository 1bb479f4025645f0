use super::vector_2d::cross_2d;
use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: Point2,
    d1: Vector2,
    p2: Point2,
    d2: Vector2,
) -> Option<(f64, f64)> {
    let cross = cross_2d(d1, d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let w = p2 - p1;
    let t = cross_2d(w, d2) / cross;
    let u = cross_2d(w, d1) / cross;
    Some((t, u))
}

/// Signed orientation of `c` relative to the directed line `a → b`.
///
/// Positive when `c` is to the left, negative to the right, near zero
/// when collinear.
#[must_use]
pub fn orient_2d(a: Point2, b: Point2, c: Point2) -> f64 {
    cross_2d(b - a, c - a)
}

/// Tests whether segments `a0 → a1` and `b0 → b1` intersect.
///
/// Reports both proper crossings (opposite orientation signs on both
/// segment pairs) and boundary contact: an endpoint whose orientation is
/// within epsilon of zero and that lies within the other segment's
/// bounding interval (touching or collinear overlap).
#[must_use]
pub fn segments_intersect_2d(a0: Point2, a1: Point2, b0: Point2, b1: Point2) -> bool {
    let d1 = orient_2d(b0, b1, a0);
    let d2 = orient_2d(b0, b1, a1);
    let d3 = orient_2d(a0, a1, b0);
    let d4 = orient_2d(a0, a1, b1);

    let opposite_a = (d1 > TOLERANCE && d2 < -TOLERANCE) || (d1 < -TOLERANCE && d2 > TOLERANCE);
    let opposite_b = (d3 > TOLERANCE && d4 < -TOLERANCE) || (d3 < -TOLERANCE && d4 > TOLERANCE);
    if opposite_a && opposite_b {
        return true;
    }

    (d1.abs() <= TOLERANCE && within_span(b0, b1, a0))
        || (d2.abs() <= TOLERANCE && within_span(b0, b1, a1))
        || (d3.abs() <= TOLERANCE && within_span(a0, a1, b0))
        || (d4.abs() <= TOLERANCE && within_span(a0, a1, b1))
}

/// Checks that `p` lies within the bounding interval of segment `a → b`.
fn within_span(a: Point2, b: Point2, p: Point2) -> bool {
    p.x >= a.x.min(b.x) - TOLERANCE
        && p.x <= a.x.max(b.x) + TOLERANCE
        && p.y >= a.y.min(b.y) - TOLERANCE
        && p.y <= a.y.max(b.y) + TOLERANCE
}

/// Intersection of a ray `origin + t * dir` (t ≥ 0) with segment `a → b`
/// (parametrized by u ∈ [0, 1]).
///
/// Solves the 2×2 linear system via cross products. Returns `(t, point)`,
/// or `None` when the ray and segment are parallel, the solved `t` is
/// negative, or `u` falls outside `[0, 1]` (small epsilon slack on both
/// bounds).
#[must_use]
pub fn ray_segment_intersect_2d(
    origin: Point2,
    dir: Vector2,
    a: Point2,
    b: Point2,
) -> Option<(f64, Point2)> {
    let seg = b - a;
    let cross = cross_2d(dir, seg);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let w = a - origin;
    let t = cross_2d(w, seg) / cross;
    let u = cross_2d(w, dir) / cross;

    let eps = 1e-9;
    if t < -eps || u < -eps || u > 1.0 + eps {
        return None;
    }
    Some((t, origin + dir * t))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn line_line_perpendicular() {
        let (t, u) = line_line_intersect_2d(
            Point2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Point2::new(0.5, -1.0),
            Vector2::new(0.0, 1.0),
        )
        .unwrap();
        assert!((t - 0.5).abs() < TOLERANCE);
        assert!((u - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn line_line_parallel_returns_none() {
        let r = line_line_intersect_2d(
            Point2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Vector2::new(1.0, 0.0),
        );
        assert!(r.is_none());
    }

    #[test]
    fn segments_proper_crossing() {
        assert!(segments_intersect_2d(
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
            Point2::new(2.0, 0.0),
        ));
    }

    #[test]
    fn segments_disjoint() {
        assert!(!segments_intersect_2d(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
        ));
    }

    #[test]
    fn segments_endpoint_touch() {
        // b starts exactly on a's interior.
        assert!(segments_intersect_2d(
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ));
    }

    #[test]
    fn segments_collinear_overlap() {
        assert!(segments_intersect_2d(
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(3.0, 0.0),
        ));
    }

    #[test]
    fn segments_collinear_disjoint() {
        assert!(!segments_intersect_2d(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 0.0),
        ));
    }

    #[test]
    fn ray_segment_forward_hit() {
        let (t, p) = ray_segment_intersect_2d(
            Point2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Point2::new(2.0, -1.0),
            Point2::new(2.0, 1.0),
        )
        .unwrap();
        assert!((t - 2.0).abs() < TOLERANCE);
        assert!((p.x - 2.0).abs() < TOLERANCE);
        assert!(p.y.abs() < TOLERANCE);
    }

    #[test]
    fn ray_segment_behind_origin() {
        let r = ray_segment_intersect_2d(
            Point2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Point2::new(-2.0, -1.0),
            Point2::new(-2.0, 1.0),
        );
        assert!(r.is_none());
    }

    #[test]
    fn ray_segment_misses_span() {
        let r = ray_segment_intersect_2d(
            Point2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(2.0, 3.0),
        );
        assert!(r.is_none());
    }

    #[test]
    fn ray_segment_parallel_returns_none() {
        let r = ray_segment_intersect_2d(
            Point2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(5.0, 1.0),
        );
        assert!(r.is_none());
    }
}
