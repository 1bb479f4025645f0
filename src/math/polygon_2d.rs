use super::intersect_2d::segments_intersect_2d;
use super::{Point2, DEGENERATE_AREA, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
///
/// The vertex sequence uses implicit closure (no repeated first vertex).
/// Positive for counter-clockwise, negative for clockwise, in the
/// mathematical y-up convention used throughout the crate.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Computes the area-weighted centroid of a polygon.
///
/// Falls back to the bounding-box center when the absolute area is below
/// [`DEGENERATE_AREA`] (degenerate/zero-area polygon).
#[must_use]
pub fn centroid_2d(points: &[Point2]) -> Point2 {
    let area = signed_area_2d(points);
    if area.abs() < DEGENERATE_AREA {
        return bounding_box_2d(points).map_or_else(
            || Point2::new(0.0, 0.0),
            |(min, max)| Point2::new((min.x + max.x) * 0.5, (min.y + max.y) * 0.5),
        );
    }

    let n = points.len();
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let w = points[i].x * points[j].y - points[j].x * points[i].y;
        cx += (points[i].x + points[j].x) * w;
        cy += (points[i].y + points[j].y) * w;
    }
    let inv = 1.0 / (6.0 * area);
    Point2::new(cx * inv, cy * inv)
}

/// Axis-aligned bounding box of a point sequence, or `None` when empty.
#[must_use]
pub fn bounding_box_2d(points: &[Point2]) -> Option<(Point2, Point2)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

/// Returns a copy of the ring oriented counter-clockwise (positive area).
///
/// Reverses the vertex sequence when the signed area is negative;
/// otherwise returns an unmodified copy.
#[must_use]
pub fn ensure_ccw(points: &[Point2]) -> Vec<Point2> {
    if signed_area_2d(points) < 0.0 {
        points.iter().rev().copied().collect()
    } else {
        points.to_vec()
    }
}

/// Returns a copy of the ring oriented clockwise (negative area).
#[must_use]
pub fn ensure_cw(points: &[Point2]) -> Vec<Point2> {
    if signed_area_2d(points) > 0.0 {
        points.iter().rev().copied().collect()
    } else {
        points.to_vec()
    }
}

/// Tests whether a point lies inside a simple polygon (ray casting).
///
/// Shoots a horizontal ray and counts edge crossings; odd parity = inside.
/// Correct for simple polygons regardless of vertex order.
#[must_use]
pub fn point_in_polygon_2d(p: Point2, points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = points[i];
        let pj = points[j];
        if (pi.y > p.y) != (pj.y > p.y)
            && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Checks that a closed ring is simple (no self-intersections).
///
/// Quadratic reference algorithm: every pair of non-adjacent edges is
/// tested for intersection; edges sharing a vertex are exempt. Touching
/// or collinear overlap between non-adjacent edges counts as an
/// intersection (weakly non-simple rings are rejected).
#[must_use]
pub fn is_simple_polygon_2d(points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        for j in (i + 1)..n {
            // Adjacent edges share a vertex; skip them (and the wrap pair).
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let a0 = points[i];
            let a1 = points[(i + 1) % n];
            let b0 = points[j];
            let b1 = points[(j + 1) % n];
            if segments_intersect_2d(a0, a1, b0, b1) {
                return false;
            }
        }
    }
    true
}

/// Collapses consecutive vertices closer than `tolerance` into one.
///
/// The comparison wraps around: trailing vertices that duplicate the first
/// are dropped, so the result always uses implicit closure.
#[must_use]
pub fn collapse_duplicates_2d(points: &[Point2], tolerance: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if let Some(last) = out.last() {
            if (p - last).norm() <= tolerance {
                continue;
            }
        }
        out.push(*p);
    }
    while out.len() > 1 {
        let first = out[0];
        match out.last() {
            Some(last) if (last - first).norm() <= tolerance => {
                out.pop();
            }
            _ => break,
        }
    }
    out
}
