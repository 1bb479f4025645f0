use crate::math::Point2;
use crate::skeleton::Skeleton;

/// A single straight cut across the folded model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutLine {
    pub a: Point2,
    pub b: Point2,
}

/// Estimates the cut line for a crease pattern.
///
/// Deliberately coarse: the cut is the horizontal line through the
/// vertical midpoint of the skeleton's bounding box, spanning the full
/// viewport width so it visibly crosses the drawing.
#[derive(Debug, Clone, Copy)]
pub struct CutLineEstimate {
    viewport_width: f64,
}

impl CutLineEstimate {
    /// Creates an estimate spanning `viewport_width`.
    #[must_use]
    pub fn new(viewport_width: f64) -> Self {
        Self { viewport_width }
    }

    /// Returns the estimated cut line, or `None` for an empty skeleton.
    #[must_use]
    pub fn execute(&self, skeleton: &Skeleton) -> Option<CutLine> {
        let (min, max) = skeleton.bounding_box()?;
        let y = (min.y + max.y) * 0.5;
        Some(CutLine {
            a: Point2::new(0.0, y),
            b: Point2::new(self.viewport_width, y),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::skeleton::SkeletonVertex;
    use approx::assert_relative_eq;

    #[test]
    fn midpoint_spans_viewport() {
        let skeleton = Skeleton {
            vertices: vec![
                SkeletonVertex::new(10.0, 20.0, 0.0),
                SkeletonVertex::new(90.0, 80.0, 0.0),
            ],
            faces: vec![],
        };
        let cut = CutLineEstimate::new(800.0).execute(&skeleton).unwrap();
        assert_relative_eq!(cut.a.y, 50.0);
        assert_relative_eq!(cut.b.y, 50.0);
        assert_relative_eq!(cut.a.x, 0.0);
        assert_relative_eq!(cut.b.x, 800.0);
    }

    #[test]
    fn empty_skeleton_has_no_cut_line() {
        assert!(CutLineEstimate::new(800.0)
            .execute(&Skeleton::default())
            .is_none());
    }
}
