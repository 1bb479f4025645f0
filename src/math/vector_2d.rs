use super::{Vector2, NORMALIZE_FLOOR};

/// 2D cross product: the signed z-component of the 3D cross of `a` and `b`.
///
/// Positive when `b` points to the left of `a`.
#[must_use]
pub fn cross_2d(a: Vector2, b: Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Normalizes `v`, returning the zero vector when its length is below
/// [`NORMALIZE_FLOOR`] (avoids dividing by a near-zero denominator).
#[must_use]
pub fn normalize_or_zero(v: Vector2) -> Vector2 {
    let len = v.norm();
    if len < NORMALIZE_FLOOR {
        Vector2::zeros()
    } else {
        v / len
    }
}

/// Returns the left-pointing perpendicular of a vector.
#[must_use]
pub fn left_perp(v: Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn cross_sign() {
        let x = Vector2::new(1.0, 0.0);
        let y = Vector2::new(0.0, 1.0);
        assert!((cross_2d(x, y) - 1.0).abs() < TOLERANCE);
        assert!((cross_2d(y, x) + 1.0).abs() < TOLERANCE);
        assert!(cross_2d(x, x).abs() < TOLERANCE);
    }

    #[test]
    fn normalize_regular() {
        let n = normalize_or_zero(Vector2::new(3.0, 4.0));
        assert!((n.x - 0.6).abs() < TOLERANCE);
        assert!((n.y - 0.8).abs() < TOLERANCE);
    }

    #[test]
    fn normalize_near_zero_returns_zero() {
        let n = normalize_or_zero(Vector2::new(1e-13, -1e-13));
        assert!(n.x.abs() < TOLERANCE);
        assert!(n.y.abs() < TOLERANCE);
    }

    #[test]
    fn left_perp_basic() {
        let n = left_perp(Vector2::new(1.0, 0.0));
        assert!(n.x.abs() < TOLERANCE);
        assert!((n.y - 1.0).abs() < TOLERANCE);
    }
}
