//! End-to-end pipeline: scene → rings → skeleton → creases → cut line.

use tracing::debug;

use crate::error::SkeletonError;
use crate::operations::{Crease, CreaseExtract, CutLine, CutLineEstimate, RingBuild, RingSet};
use crate::scene::{Scene, ShapeKey};
use crate::skeleton::{Skeleton, SkeletonAdapter, SkeletonSolver};
use crate::Result;

/// Drawing viewport dimensions, used to size the cut line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Everything one engine run produces.
#[derive(Debug, Clone)]
pub struct ResultBundle {
    pub rings: RingSet,
    pub skeleton: Skeleton,
    pub creases: Vec<Crease>,
    pub cut_line: CutLine,
}

/// The fold-and-cut engine.
///
/// Holds the memoized skeleton solver; the engine itself is stateless
/// across runs and can be shared between threads.
#[derive(Debug, Default)]
pub struct Engine {
    adapter: SkeletonAdapter,
}

impl Engine {
    /// Creates an engine using the built-in wavefront solver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with a custom skeleton solver.
    #[must_use]
    pub fn with_solver(solver: Box<dyn SkeletonSolver>) -> Self {
        Self {
            adapter: SkeletonAdapter::with_solver(solver),
        }
    }

    /// Runs the full pipeline over `scene`.
    ///
    /// `preferred_outer` pins a specific shape as the outer boundary;
    /// pass `None` for automatic largest-area selection.
    ///
    /// # Errors
    ///
    /// Propagates ring validation errors and solver failures; an empty
    /// skeleton (no cut line derivable) is reported as a computation
    /// failure.
    pub fn run(
        &self,
        scene: &Scene,
        preferred_outer: Option<ShapeKey>,
        viewport: Viewport,
    ) -> Result<ResultBundle> {
        let builder = preferred_outer.map_or_else(RingBuild::new, RingBuild::with_preferred_outer);
        let rings = builder.execute(scene)?;
        debug!(holes = rings.holes.len(), "rings extracted");

        let boundaries = rings.closed_coordinates();
        let skeleton = self.adapter.ready().solve(&boundaries)?;
        debug!(
            vertices = skeleton.vertices.len(),
            faces = skeleton.faces.len(),
            "skeleton computed"
        );

        let creases = CreaseExtract::new().execute(&skeleton);
        let cut_line = CutLineEstimate::new(viewport.width)
            .execute(&skeleton)
            .ok_or_else(|| {
                SkeletonError::ComputationFailed("skeleton has no vertices".to_owned())
            })?;
        debug!(creases = creases.len(), "run complete");

        Ok(ResultBundle {
            rings,
            skeleton,
            creases,
            cut_line,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::OricutError;
    use crate::math::{Point2, EPS_TIME};
    use crate::operations::CreaseKind;
    use crate::scene::Shape;

    const TOL: f64 = 1e-6;

    fn square_scene(size: f64) -> Scene {
        let mut scene = Scene::new();
        scene.add_shape(Shape::closed_polygon(vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ]));
        scene
    }

    #[test]
    fn square_end_to_end() {
        let engine = Engine::new();
        let bundle = engine
            .run(&square_scene(100.0), None, Viewport::new(800.0, 600.0))
            .unwrap();

        assert_eq!(bundle.rings.holes.len(), 0);
        assert_eq!(bundle.skeleton.faces.len(), 4);

        let apex: Vec<_> = bundle
            .skeleton
            .vertices
            .iter()
            .filter(|v| v.time > EPS_TIME)
            .collect();
        assert_eq!(apex.len(), 1);
        assert!((apex[0].x - 50.0).abs() < TOL);
        assert!((apex[0].y - 50.0).abs() < TOL);

        let mountains = bundle
            .creases
            .iter()
            .filter(|c| c.kind == CreaseKind::Mountain)
            .count();
        let valleys = bundle
            .creases
            .iter()
            .filter(|c| c.kind == CreaseKind::Valley)
            .count();
        assert_eq!(mountains, 4);
        assert_eq!(valleys, 4);

        assert!((bundle.cut_line.a.y - 50.0).abs() < TOL);
        assert!((bundle.cut_line.b.x - 800.0).abs() < TOL);
        assert!(bundle.cut_line.a.x.abs() < TOL);
    }

    #[test]
    fn ring_errors_propagate() {
        let engine = Engine::new();
        let err = engine
            .run(&Scene::new(), None, Viewport::new(800.0, 600.0))
            .unwrap_err();
        assert!(matches!(err, OricutError::Ring(_)));
    }

    #[test]
    fn solver_errors_propagate() {
        use crate::skeleton::{Skeleton, SkeletonSolver};

        struct Failing;
        impl SkeletonSolver for Failing {
            fn solve(
                &self,
                _rings: &[Vec<Point2>],
            ) -> std::result::Result<Skeleton, SkeletonError> {
                Err(SkeletonError::ComputationFailed("backend down".to_owned()))
            }
        }

        let engine = Engine::with_solver(Box::new(Failing));
        let err = engine
            .run(&square_scene(10.0), None, Viewport::new(100.0, 100.0))
            .unwrap_err();
        assert!(err.to_string().contains("backend down"));
    }

    #[test]
    fn empty_skeleton_is_a_computation_failure() {
        use crate::skeleton::{Skeleton, SkeletonSolver};

        struct Empty;
        impl SkeletonSolver for Empty {
            fn solve(
                &self,
                _rings: &[Vec<Point2>],
            ) -> std::result::Result<Skeleton, SkeletonError> {
                Ok(Skeleton::default())
            }
        }

        let engine = Engine::with_solver(Box::new(Empty));
        let err = engine
            .run(&square_scene(10.0), None, Viewport::new(100.0, 100.0))
            .unwrap_err();
        assert!(err.to_string().contains("no vertices"));
    }
}
