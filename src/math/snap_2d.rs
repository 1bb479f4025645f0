use super::Point2;

/// A point quantized onto the integer lattice of a snapping tolerance.
pub type SnapKey = (i64, i64);

/// Canonical key for an undirected segment under a snapping tolerance.
pub type EdgeSnapKey = (SnapKey, SnapKey);

/// Rounds each coordinate to the nearest multiple of `tolerance`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn quantize_2d(p: Point2, tolerance: f64) -> SnapKey {
    ((p.x / tolerance).round() as i64, (p.y / tolerance).round() as i64)
}

/// Canonical undirected key for the segment `a → b`.
///
/// The lexicographically smaller quantized endpoint comes first, so two
/// geometrically coincident segments (within the snapping tolerance)
/// produce the same key regardless of direction.
#[must_use]
pub fn undirected_edge_key_2d(a: Point2, b: Point2, tolerance: f64) -> EdgeSnapKey {
    let ka = quantize_2d(a, tolerance);
    let kb = quantize_2d(b, tolerance);
    if kb < ka {
        (kb, ka)
    } else {
        (ka, kb)
    }
}
