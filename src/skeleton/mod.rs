pub mod wavefront;

pub use wavefront::WavefrontSolver;

use std::fmt;
use std::sync::OnceLock;

use crate::error::SkeletonError;
use crate::math::Point2;

/// A vertex of the straight-skeleton graph.
///
/// `time` is the wavefront collapse time: `0` for original boundary
/// vertices, `> 0` for interior nodes created as the boundary shrinks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonVertex {
    pub x: f64,
    pub y: f64,
    pub time: f64,
}

impl SkeletonVertex {
    /// Creates a new skeleton vertex.
    #[must_use]
    pub fn new(x: f64, y: f64, time: f64) -> Self {
        Self { x, y, time }
    }

    /// Position of this vertex as a [`Point2`].
    #[must_use]
    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// One region of the skeleton subdivision: the area swept inward by a
/// single original boundary edge, as a cyclic list of vertex indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonFace {
    pub vertices: Vec<usize>,
}

impl SkeletonFace {
    /// Creates a face from a cyclic vertex index list.
    #[must_use]
    pub fn new(vertices: Vec<usize>) -> Self {
        Self { vertices }
    }
}

/// Straight-skeleton graph: a vertex list with collapse times plus one
/// face per original boundary edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skeleton {
    pub vertices: Vec<SkeletonVertex>,
    pub faces: Vec<SkeletonFace>,
}

impl Skeleton {
    /// Axis-aligned bounding box over all vertices, or `None` when empty.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Point2, Point2)> {
        let first = self.vertices.first()?;
        let mut min = first.position();
        let mut max = min;
        for v in &self.vertices[1..] {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        Some((min, max))
    }
}

/// Black-box straight-skeleton capability.
///
/// Input rings use the explicit-closure boundary format produced by the
/// ring builder: the outer ring (CCW) first, then holes (CW), each with
/// its first vertex repeated at the end.
pub trait SkeletonSolver: Send + Sync {
    /// Computes the straight skeleton of the given ring set.
    ///
    /// # Errors
    ///
    /// Returns [`SkeletonError::ComputationFailed`] when the geometry is
    /// not admissible (e.g. weakly non-simple after normalization) or the
    /// wavefront fails to collapse.
    fn solve(&self, rings: &[Vec<Point2>]) -> Result<Skeleton, SkeletonError>;
}

/// Memoizing handle around a [`SkeletonSolver`].
///
/// Solver initialization happens once per adapter lifetime and is
/// idempotent: concurrent callers of [`SkeletonAdapter::ready`] all
/// observe the same completed instance, never one per caller.
#[derive(Default)]
pub struct SkeletonAdapter {
    solver: OnceLock<Box<dyn SkeletonSolver>>,
}

impl SkeletonAdapter {
    /// Creates an adapter that lazily initializes the built-in
    /// [`WavefrontSolver`] on first use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter pre-initialized with a custom solver
    /// (e.g. a binding to an external CGAL-style implementation).
    #[must_use]
    pub fn with_solver(solver: Box<dyn SkeletonSolver>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(solver);
        Self { solver: cell }
    }

    /// Returns the ready solver, initializing it on first call.
    /// Subsequent calls return the same instance.
    pub fn ready(&self) -> &dyn SkeletonSolver {
        self.solver
            .get_or_init(|| Box::new(WavefrontSolver::new()))
            .as_ref()
    }
}

impl fmt::Debug for SkeletonAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkeletonAdapter")
            .field("initialized", &self.solver.get().is_some())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_of_vertices() {
        let skeleton = Skeleton {
            vertices: vec![
                SkeletonVertex::new(-1.0, 2.0, 0.0),
                SkeletonVertex::new(3.0, -4.0, 0.0),
                SkeletonVertex::new(0.0, 0.0, 1.0),
            ],
            faces: vec![],
        };
        let (min, max) = skeleton.bounding_box().unwrap();
        assert!((min.x + 1.0).abs() < 1e-12);
        assert!((min.y + 4.0).abs() < 1e-12);
        assert!((max.x - 3.0).abs() < 1e-12);
        assert!((max.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_skeleton_has_no_bbox() {
        assert!(Skeleton::default().bounding_box().is_none());
    }

    #[test]
    fn adapter_memoizes_one_instance() {
        let adapter = SkeletonAdapter::new();
        let a = std::ptr::from_ref(adapter.ready()).cast::<()>();
        let b = std::ptr::from_ref(adapter.ready()).cast::<()>();
        assert!(std::ptr::eq(a, b), "ready() must return the same instance");
    }

    #[test]
    fn injected_solver_failure_surfaces() {
        struct Failing;
        impl SkeletonSolver for Failing {
            fn solve(&self, _rings: &[Vec<Point2>]) -> Result<Skeleton, SkeletonError> {
                Err(SkeletonError::ComputationFailed("rejected".to_owned()))
            }
        }
        let adapter = SkeletonAdapter::with_solver(Box::new(Failing));
        let err = adapter.ready().solve(&[]).unwrap_err();
        assert!(err.to_string().contains("rejected"));
    }
}
