use egui::{Color32, Pos2, Rect, Vec2};

use super::common;

/// Axis-aligned box kept both as a canonical rect and its four corner points.
///
/// The corners are always regenerated together from the rect, never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    rect: Rect,
    points: [Pos2; 4],
    color: Color32,
    selected: bool,
}

impl BoxShape {
    /// Create a box spanning two arbitrary corner points
    pub fn new(a: Pos2, b: Pos2, color: Color32) -> Self {
        let rect = common::normalized_rect(a, b);
        Self {
            rect,
            points: common::rect_corners(&rect),
            color,
            selected: false,
        }
    }

    /// Reset the box to the rect spanned by `a` and `b`, in any order
    pub fn set_rect(&mut self, a: Pos2, b: Pos2) {
        self.rect = common::normalized_rect(a, b);
        self.points = common::rect_corners(&self.rect);
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn x(&self) -> f32 {
        self.rect.min.x
    }

    pub fn y(&self) -> f32 {
        self.rect.min.y
    }

    pub fn width(&self) -> f32 {
        self.rect.width()
    }

    pub fn height(&self) -> f32 {
        self.rect.height()
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
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
        self.set_rect(self.rect.min + delta, self.rect.max + delta);
    }

    /// True when the box has no area
    pub fn is_degenerate(&self) -> bool {
        self.rect.width() <= 0.0 || self.rect.height() <= 0.0
    }
}
