pub mod shape;

pub use shape::Shape;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable identifier for a shape in a [`Scene`].
    pub struct ShapeKey;
}

/// Arena that owns every shape in the drawing.
///
/// External collaborators (editor tools, persistence) reference shapes via
/// [`ShapeKey`] generational indices, so held keys stay valid across edits
/// and never dangle.
#[derive(Debug, Default)]
pub struct Scene {
    shapes: SlotMap<ShapeKey, Shape>,
}

impl Scene {
    /// Creates a new, empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a shape and returns its key.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeKey {
        self.shapes.insert(shape)
    }

    /// Removes a shape, returning it if present.
    pub fn remove_shape(&mut self, key: ShapeKey) -> Option<Shape> {
        self.shapes.remove(key)
    }

    /// Returns the shape for `key`, or `None` for a stale key.
    #[must_use]
    pub fn shape(&self, key: ShapeKey) -> Option<&Shape> {
        self.shapes.get(key)
    }

    /// Iterates over all shapes with their keys.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeKey, &Shape)> {
        self.shapes.iter()
    }

    /// Number of shapes in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the scene holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
