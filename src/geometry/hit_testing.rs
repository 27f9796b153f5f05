use egui::{CursorIcon, Pos2, Rect};

use crate::element::Shape;

/// One of the eight resize zones of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Right,
    Left,
    Top,
    Bottom,
    RightBottom,
    RightTop,
    LeftBottom,
    LeftTop,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Right => "right",
            Placement::Left => "left",
            Placement::Top => "top",
            Placement::Bottom => "bottom",
            Placement::RightBottom => "right-bottom",
            Placement::RightTop => "right-top",
            Placement::LeftBottom => "left-bottom",
            Placement::LeftTop => "left-top",
        }
    }

    /// Resize direction shown before the pointer crosses any anchor edge
    pub fn direction(&self) -> ResizeDirection {
        match self {
            Placement::Right => ResizeDirection::East,
            Placement::Left => ResizeDirection::West,
            Placement::Top => ResizeDirection::North,
            Placement::Bottom => ResizeDirection::South,
            Placement::RightBottom => ResizeDirection::SouthEast,
            Placement::RightTop => ResizeDirection::NorthEast,
            Placement::LeftBottom => ResizeDirection::SouthWest,
            Placement::LeftTop => ResizeDirection::NorthWest,
        }
    }
}

/// Compass direction of a resize cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    East,
    West,
    North,
    South,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

/// Interaction hint for the pointer's current position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Affordance {
    /// Nothing under the pointer; a press starts a new shape
    #[default]
    Crosshair,
    /// Over a shape's body
    Move,
    /// Over a polygon vertex
    Vertex,
    Resize(ResizeDirection),
}

impl Affordance {
    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Affordance::Crosshair => CursorIcon::Crosshair,
            Affordance::Move => CursorIcon::Move,
            Affordance::Vertex => CursorIcon::Default,
            Affordance::Resize(direction) => match direction {
                ResizeDirection::East => CursorIcon::ResizeEast,
                ResizeDirection::West => CursorIcon::ResizeWest,
                ResizeDirection::North => CursorIcon::ResizeNorth,
                ResizeDirection::South => CursorIcon::ResizeSouth,
                ResizeDirection::NorthEast => CursorIcon::ResizeNorthEast,
                ResizeDirection::NorthWest => CursorIcon::ResizeNorthWest,
                ResizeDirection::SouthEast => CursorIcon::ResizeSouthEast,
                ResizeDirection::SouthWest => CursorIcon::ResizeSouthWest,
            },
        }
    }
}

/// What a press at the hit-tested position would grab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitTarget {
    #[default]
    None,
    Body { index: usize },
    Vertex { index: usize, vertex: usize },
    Edge { index: usize, placement: Placement },
}

impl HitTarget {
    pub fn shape_index(&self) -> Option<usize> {
        match *self {
            HitTarget::None => None,
            HitTarget::Body { index }
            | HitTarget::Vertex { index, .. }
            | HitTarget::Edge { index, .. } => Some(index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitResult {
    pub affordance: Affordance,
    pub target: HitTarget,
}

/// Proximity zone of a point relative to a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxZone {
    Resize(Placement),
    Body,
}

/// Classify `pos` into one of the nine zones of `rect`.
///
/// Edge bands lie inside the rect. Corners are checked before edges and
/// edges before the interior, so a point near two edges resolves to the
/// corner between them.
pub fn classify_box(pos: Pos2, rect: Rect, band: f32) -> Option<BoxZone> {
    let (min_x, min_y, max_x, max_y) = (rect.min.x, rect.min.y, rect.max.x, rect.max.y);

    let near_left = pos.x >= min_x && pos.x < min_x + band;
    let near_right = pos.x > max_x - band && pos.x <= max_x;
    let near_top = pos.y >= min_y && pos.y < min_y + band;
    let near_bottom = pos.y > max_y - band && pos.y <= max_y;
    let inner_x = pos.x >= min_x + band && pos.x <= max_x - band;
    let inner_y = pos.y >= min_y + band && pos.y <= max_y - band;

    let placement = if near_right && near_bottom {
        Placement::RightBottom
    } else if near_right && near_top {
        Placement::RightTop
    } else if near_left && near_bottom {
        Placement::LeftBottom
    } else if near_left && near_top {
        Placement::LeftTop
    } else if near_right && inner_y {
        Placement::Right
    } else if near_left && inner_y {
        Placement::Left
    } else if near_top && inner_x {
        Placement::Top
    } else if near_bottom && inner_x {
        Placement::Bottom
    } else if inner_x && inner_y {
        return Some(BoxZone::Body);
    } else {
        return None;
    };

    Some(BoxZone::Resize(placement))
}

/// Resolve what the pointer at `pos` would address.
///
/// Shapes are tested in list order and the first match wins. Stateless: the
/// same inputs always give the same result.
pub fn hit_test(pos: Pos2, shapes: &[Shape], band: f32, vertex_radius: f32) -> HitResult {
    for (index, shape) in shapes.iter().enumerate() {
        match shape {
            Shape::Box(b) => match classify_box(pos, b.rect(), band) {
                Some(BoxZone::Resize(placement)) => {
                    return HitResult {
                        affordance: Affordance::Resize(placement.direction()),
                        target: HitTarget::Edge { index, placement },
                    };
                }
                Some(BoxZone::Body) => {
                    return HitResult {
                        affordance: Affordance::Move,
                        target: HitTarget::Body { index },
                    };
                }
                None => {}
            },
            Shape::Polygon(p) => {
                let grabbed = p
                    .points()
                    .iter()
                    .position(|vertex| pos.distance(*vertex) < vertex_radius);
                if let Some(vertex) = grabbed {
                    return HitResult {
                        affordance: Affordance::Vertex,
                        target: HitTarget::Vertex { index, vertex },
                    };
                }
                if p.contains(pos) {
                    return HitResult {
                        affordance: Affordance::Move,
                        target: HitTarget::Body { index },
                    };
                }
            }
        }
    }

    HitResult::default()
}
