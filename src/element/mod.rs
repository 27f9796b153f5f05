use egui::{Color32, Pos2, Vec2};

mod common;
mod polygon;
mod rectangle;

pub use polygon::{PolygonShape, MIN_POLYGON_VERTICES};
pub use rectangle::BoxShape;

/// Which kind of shape a record holds, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Box,
    Polygon,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Polygon => "polygon",
        }
    }
}

/// Common trait that all shape records implement
pub trait Element {
    /// Get the shape kind tag
    fn kind(&self) -> ShapeKind;

    /// Outline points in drawing order
    fn points(&self) -> &[Pos2];

    /// Border color
    fn color(&self) -> Color32;

    fn is_selected(&self) -> bool;

    fn set_selected(&mut self, selected: bool);

    /// Translate every point of the shape by `delta`
    fn translate(&mut self, delta: Vec2);
}

/// A shape record in the editor's collection
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Box(BoxShape),
    Polygon(PolygonShape),
}

impl Element for Shape {
    fn kind(&self) -> ShapeKind {
        match self {
            Shape::Box(_) => ShapeKind::Box,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    fn points(&self) -> &[Pos2] {
        match self {
            Shape::Box(b) => b.points(),
            Shape::Polygon(p) => p.points(),
        }
    }

    fn color(&self) -> Color32 {
        match self {
            Shape::Box(b) => b.color(),
            Shape::Polygon(p) => p.color(),
        }
    }

    fn is_selected(&self) -> bool {
        match self {
            Shape::Box(b) => b.is_selected(),
            Shape::Polygon(p) => p.is_selected(),
        }
    }

    fn set_selected(&mut self, selected: bool) {
        match self {
            Shape::Box(b) => b.set_selected(selected),
            Shape::Polygon(p) => p.set_selected(selected),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Box(b) => b.translate(delta),
            Shape::Polygon(p) => p.translate(delta),
        }
    }
}

impl Shape {
    pub fn as_box(&self) -> Option<&BoxShape> {
        match self {
            Shape::Box(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&PolygonShape> {
        match self {
            Shape::Polygon(p) => Some(p),
            _ => None,
        }
    }
}

/// Select `index` and clear the flag on every other shape
pub(crate) fn select_only(shapes: &mut [Shape], index: usize) {
    for (i, shape) in shapes.iter_mut().enumerate() {
        shape.set_selected(i == index);
    }
}

/// Factory functions for creating shapes
pub mod factory {
    use super::*;

    /// Create a box spanning two corner points
    pub fn create_box(a: Pos2, b: Pos2, color: Color32) -> Shape {
        Shape::Box(BoxShape::new(a, b, color))
    }

    /// Create a polygon from its vertices in drawing order
    pub fn create_polygon(points: Vec<Pos2>, color: Color32) -> Shape {
        Shape::Polygon(PolygonShape::new(points, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        let b = factory::create_box(Pos2::ZERO, Pos2::new(1.0, 1.0), Color32::RED);
        let p = factory::create_polygon(vec![Pos2::ZERO], Color32::RED);
        assert_eq!(b.kind(), ShapeKind::Box);
        assert_eq!(p.kind(), ShapeKind::Polygon);
        assert_eq!(p.kind().as_str(), "polygon");
        assert!(b.as_box().is_some());
        assert!(b.as_polygon().is_none());
    }

    #[test]
    fn test_select_only() {
        let mut shapes: Vec<Shape> = (0..3)
            .map(|i| {
                let offset = i as f32 * 10.0;
                factory::create_box(
                    Pos2::new(offset, offset),
                    Pos2::new(offset + 5.0, offset + 5.0),
                    Color32::RED,
                )
            })
            .collect();
        shapes[0].set_selected(true);
        shapes[2].set_selected(true);

        select_only(&mut shapes, 1);
        let flags: Vec<bool> = shapes.iter().map(|s| s.is_selected()).collect();
        assert_eq!(flags, vec![false, true, false]);
    }
}
