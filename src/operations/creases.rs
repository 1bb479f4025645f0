use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::math::intersect_2d::ray_segment_intersect_2d;
use crate::math::snap_2d::{undirected_edge_key_2d, EdgeSnapKey};
use crate::math::{
    Point2, DEGENERATE_EDGE_SQ, EPS_TIME, RAY_SELF_HIT, SNAP_TOLERANCE,
};
use crate::skeleton::Skeleton;

/// Fold direction of a crease.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreaseKind {
    Mountain,
    Valley,
}

/// One crease segment of the pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Crease {
    pub a: Point2,
    pub b: Point2,
    pub kind: CreaseKind,
    /// Provenance label for debugging and export.
    pub source: Option<String>,
}

/// Derives mountain and valley creases from a straight skeleton.
///
/// Mountains are the interior skeleton arcs: face edges shared by two or
/// more faces. Valleys are a heuristic approximation of the true
/// perpendicular fold pattern: for each face, every elevated vertex is
/// projected perpendicularly onto the face's defining boundary edge, and
/// the projection ray is clipped against the face boundary. Faces with no
/// identifiable defining edge contribute no valleys, and rays that miss
/// the boundary are skipped rather than treated as errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreaseExtract;

impl CreaseExtract {
    /// Creates a new crease extraction.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Extracts creases from `skeleton`: mountains first, then valleys,
    /// deduplicated under the snapping tolerance.
    #[must_use]
    pub fn execute(&self, skeleton: &Skeleton) -> Vec<Crease> {
        let mut seen: HashSet<EdgeSnapKey> = HashSet::new();
        let mut creases = self.mountains(skeleton, &mut seen);
        let valleys = self.valleys(skeleton, &mut seen);
        debug!(
            mountains = creases.len(),
            valleys = valleys.len(),
            "creases extracted"
        );
        creases.extend(valleys);
        creases
    }

    /// Interior arcs: undirected face edges with multiplicity >= 2.
    /// Boundary edges belong to exactly one face and never qualify.
    fn mountains(&self, skeleton: &Skeleton, seen: &mut HashSet<EdgeSnapKey>) -> Vec<Crease> {
        let mut multiplicity: BTreeMap<(usize, usize), usize> = BTreeMap::new();
        for face in &skeleton.faces {
            let n = face.vertices.len();
            for i in 0..n {
                let a = face.vertices[i];
                let b = face.vertices[(i + 1) % n];
                if a == b {
                    continue;
                }
                *multiplicity.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }

        let mut out = Vec::new();
        for ((a, b), count) in multiplicity {
            if count < 2 {
                continue;
            }
            let (Some(va), Some(vb)) = (skeleton.vertices.get(a), skeleton.vertices.get(b))
            else {
                continue;
            };
            let pa = va.position();
            let pb = vb.position();
            if (pb - pa).norm_squared() < DEGENERATE_EDGE_SQ {
                continue;
            }
            if seen.insert(undirected_edge_key_2d(pa, pb, SNAP_TOLERANCE)) {
                out.push(Crease {
                    a: pa,
                    b: pb,
                    kind: CreaseKind::Mountain,
                    source: Some("skeleton-interior".to_owned()),
                });
            }
        }
        out
    }

    fn valleys(&self, skeleton: &Skeleton, seen: &mut HashSet<EdgeSnapKey>) -> Vec<Crease> {
        let mut out = Vec::new();

        for (fi, face) in skeleton.faces.iter().enumerate() {
            let positions: Vec<Point2> = face
                .vertices
                .iter()
                .filter_map(|&i| skeleton.vertices.get(i).map(|v| v.position()))
                .collect();
            if positions.len() != face.vertices.len() {
                continue;
            }

            let Some((d0, d1)) = defining_edge(skeleton, face.vertices.as_slice()) else {
                continue;
            };
            let dir = d1 - d0;
            let len_sq = dir.norm_squared();
            if len_sq < DEGENERATE_EDGE_SQ {
                continue;
            }

            for (&vi, &p) in face.vertices.iter().zip(&positions) {
                let Some(v) = skeleton.vertices.get(vi) else {
                    continue;
                };
                if v.time <= EPS_TIME {
                    continue;
                }
                // Perpendicular foot on the defining edge's line.
                let t = (p - d0).dot(&dir) / len_sq;
                let foot = d0 + dir * t;
                let ray = foot - p;
                if ray.norm_squared() < DEGENERATE_EDGE_SQ {
                    continue;
                }

                // Clip the ray against the face boundary; the nearest hit
                // beyond the origin is the valley endpoint.
                let mut best: Option<(f64, Point2)> = None;
                let n = positions.len();
                for i in 0..n {
                    let a = positions[i];
                    let b = positions[(i + 1) % n];
                    if let Some((hit_t, hit)) = ray_segment_intersect_2d(p, ray, a, b) {
                        if hit_t > RAY_SELF_HIT
                            && best.is_none_or(|(bt, _)| hit_t < bt)
                        {
                            best = Some((hit_t, hit));
                        }
                    }
                }
                let Some((_, hit)) = best else {
                    continue;
                };

                if seen.insert(undirected_edge_key_2d(p, hit, SNAP_TOLERANCE)) {
                    out.push(Crease {
                        a: p,
                        b: hit,
                        kind: CreaseKind::Valley,
                        source: Some(format!("face-{fi}")),
                    });
                }
            }
        }
        out
    }
}

/// Defining boundary edge of a face: the farthest-apart pair among its
/// time-zero vertices, or `None` when fewer than two exist.
fn defining_edge(skeleton: &Skeleton, vertices: &[usize]) -> Option<(Point2, Point2)> {
    let boundary: Vec<Point2> = vertices
        .iter()
        .filter_map(|&i| skeleton.vertices.get(i))
        .filter(|v| v.time <= EPS_TIME)
        .map(|v| v.position())
        .collect();
    if boundary.len() < 2 {
        return None;
    }
    let mut best = (boundary[0], boundary[1]);
    let mut best_sq = (boundary[1] - boundary[0]).norm_squared();
    for i in 0..boundary.len() {
        for j in (i + 1)..boundary.len() {
            let d = (boundary[j] - boundary[i]).norm_squared();
            if d > best_sq {
                best = (boundary[i], boundary[j]);
                best_sq = d;
            }
        }
    }
    Some(best)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::skeleton::{SkeletonFace, SkeletonSolver, SkeletonVertex, WavefrontSolver};

    const TOL: f64 = 1e-6;

    fn square_skeleton() -> Skeleton {
        let ring = vec![
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 100.0),
            Point2::new(0.0, 100.0),
            Point2::new(0.0, 0.0),
        ];
        WavefrontSolver::new().solve(&[ring]).unwrap()
    }

    #[test]
    fn square_yields_four_mountains_and_four_valleys() {
        let creases = CreaseExtract::new().execute(&square_skeleton());

        let mountains: Vec<&Crease> = creases
            .iter()
            .filter(|c| c.kind == CreaseKind::Mountain)
            .collect();
        let valleys: Vec<&Crease> = creases
            .iter()
            .filter(|c| c.kind == CreaseKind::Valley)
            .collect();
        assert_eq!(mountains.len(), 4);
        assert_eq!(valleys.len(), 4);

        // Mountains radiate from corners to the apex.
        for m in &mountains {
            let apex = if (m.a - Point2::new(50.0, 50.0)).norm() < TOL {
                m.a
            } else {
                m.b
            };
            assert!((apex - Point2::new(50.0, 50.0)).norm() < TOL);
        }

        // Valleys drop from the apex to the edge midpoints.
        let mut feet: Vec<Point2> = Vec::new();
        for v in &valleys {
            assert!((v.a - Point2::new(50.0, 50.0)).norm() < TOL);
            feet.push(v.b);
        }
        feet.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        let expected = [
            Point2::new(0.0, 50.0),
            Point2::new(50.0, 0.0),
            Point2::new(50.0, 100.0),
            Point2::new(100.0, 50.0),
        ];
        for (foot, want) in feet.iter().zip(expected) {
            assert!((foot - want).norm() < TOL, "foot {foot:?} != {want:?}");
        }
    }

    #[test]
    fn mountains_come_before_valleys() {
        let creases = CreaseExtract::new().execute(&square_skeleton());
        let first_valley = creases
            .iter()
            .position(|c| c.kind == CreaseKind::Valley)
            .unwrap();
        assert!(creases[..first_valley]
            .iter()
            .all(|c| c.kind == CreaseKind::Mountain));
    }

    #[test]
    fn near_coincident_creases_are_deduplicated() {
        // Two faces sharing edge 0-1; their elevated tips differ by less
        // than the snapping tolerance, so their valleys collapse to one.
        let skeleton = Skeleton {
            vertices: vec![
                SkeletonVertex::new(0.0, 0.0, 0.0),
                SkeletonVertex::new(10.0, 0.0, 0.0),
                SkeletonVertex::new(5.0, 4.0, 2.0),
                SkeletonVertex::new(5.004, 4.0, 2.0),
            ],
            faces: vec![
                SkeletonFace::new(vec![0, 1, 2]),
                SkeletonFace::new(vec![0, 1, 3]),
            ],
        };

        let creases = CreaseExtract::new().execute(&skeleton);
        let mountains = creases
            .iter()
            .filter(|c| c.kind == CreaseKind::Mountain)
            .count();
        let valleys = creases
            .iter()
            .filter(|c| c.kind == CreaseKind::Valley)
            .count();
        assert_eq!(mountains, 1, "shared edge 0-1 is the only mountain");
        assert_eq!(valleys, 1, "near-coincident valleys deduplicate");
    }

    #[test]
    fn face_without_defining_edge_is_skipped() {
        let skeleton = Skeleton {
            vertices: vec![
                SkeletonVertex::new(0.0, 0.0, 0.0),
                SkeletonVertex::new(4.0, 0.0, 1.0),
                SkeletonVertex::new(2.0, 3.0, 2.0),
            ],
            faces: vec![SkeletonFace::new(vec![0, 1, 2])],
        };
        let creases = CreaseExtract::new().execute(&skeleton);
        assert!(creases.iter().all(|c| c.kind == CreaseKind::Mountain));
    }

    #[test]
    fn empty_skeleton_yields_no_creases() {
        assert!(CreaseExtract::new().execute(&Skeleton::default()).is_empty());
    }
}
