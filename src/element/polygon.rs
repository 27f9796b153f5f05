use egui::{Color32, Pos2, Vec2};

use super::common;

/// Fewest vertices a committed polygon may have
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Free-form polygon; vertex order is drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    points: Vec<Pos2>,
    color: Color32,
    selected: bool,
}

impl PolygonShape {
    pub fn new(points: Vec<Pos2>, color: Color32) -> Self {
        debug_assert!(!points.is_empty(), "polygon needs at least one vertex");
        Self {
            points,
            color,
            selected: false,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    /// Replace all vertices. Self-intersecting loops are allowed.
    pub fn set_vertices(&mut self, points: Vec<Pos2>) {
        debug_assert!(!points.is_empty(), "polygon needs at least one vertex");
        self.points = points;
    }

    pub fn vertex(&self, index: usize) -> Pos2 {
        self.points[index]
    }

    /// Replace a single vertex.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn mutate_vertex(&mut self, index: usize, point: Pos2) {
        self.points[index] = point;
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    /// Nonzero-winding interior test over the closed vertex loop
    pub fn contains(&self, pos: Pos2) -> bool {
        common::polygon_contains(&self.points, pos)
    }
}
