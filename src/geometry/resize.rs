use egui::{Pos2, Rect};

use super::hit_testing::{Placement, ResizeDirection};

/// Result of one resize step: two opposite corners for the box's rect setter
/// and the direction the cursor should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStep {
    pub from: Pos2,
    pub to: Pos2,
    pub direction: ResizeDirection,
}

impl ResizeStep {
    fn new(from: (f32, f32), to: (f32, f32), direction: ResizeDirection) -> Self {
        Self {
            from: Pos2::new(from.0, from.1),
            to: Pos2::new(to.0, to.1),
            direction,
        }
    }
}

/// Compute the resized rect for a drag on `placement`.
///
/// `snapshot` is the box as it was when the gesture began, `grab` the press
/// position and `pointer` the live position. Each moving axis compares the
/// pointer against the snapshot's opposite (anchor) edge. Before the anchor
/// is crossed the moving edge follows the pointer's offset from `grab`; once
/// crossed the pointer itself becomes the new edge, the anchor the fixed
/// bound, and the direction flips.
pub fn resize_rect(snapshot: Rect, placement: Placement, grab: Pos2, pointer: Pos2) -> ResizeStep {
    use ResizeDirection::*;

    let (min_x, min_y, max_x, max_y) = (snapshot.min.x, snapshot.min.y, snapshot.max.x, snapshot.max.y);
    let (px, py) = (pointer.x, pointer.y);
    let offset = pointer - grab;

    match placement {
        Placement::Right => {
            if px < min_x {
                ResizeStep::new((px, min_y), (min_x, max_y), West)
            } else {
                ResizeStep::new((min_x, min_y), (max_x + offset.x, max_y), East)
            }
        }
        Placement::Left => {
            if px > max_x {
                ResizeStep::new((max_x, min_y), (px, max_y), East)
            } else {
                ResizeStep::new((min_x + offset.x, min_y), (max_x, max_y), West)
            }
        }
        Placement::Top => {
            if py > max_y {
                ResizeStep::new((min_x, max_y), (max_x, py), South)
            } else {
                ResizeStep::new((min_x, min_y + offset.y), (max_x, max_y), North)
            }
        }
        Placement::Bottom => {
            if py < min_y {
                ResizeStep::new((min_x, py), (max_x, min_y), North)
            } else {
                ResizeStep::new((min_x, min_y), (max_x, max_y + offset.y), South)
            }
        }
        // Anchors: left edge and top edge
        Placement::RightBottom => match (px < min_x, py < min_y) {
            (false, false) => {
                ResizeStep::new((min_x, min_y), (max_x + offset.x, max_y + offset.y), SouthEast)
            }
            (true, false) => ResizeStep::new((px, min_y), (min_x, max_y + offset.y), SouthWest),
            (false, true) => ResizeStep::new((min_x, py), (max_x + offset.x, min_y), NorthEast),
            (true, true) => ResizeStep::new((px, py), (min_x, min_y), NorthWest),
        },
        // Anchors: left edge and bottom edge
        Placement::RightTop => match (px < min_x, py > max_y) {
            (false, false) => {
                ResizeStep::new((min_x, min_y + offset.y), (max_x + offset.x, max_y), NorthEast)
            }
            (true, false) => ResizeStep::new((px, min_y + offset.y), (min_x, max_y), NorthWest),
            (false, true) => ResizeStep::new((min_x, max_y), (max_x + offset.x, py), SouthEast),
            (true, true) => ResizeStep::new((px, max_y), (min_x, py), SouthWest),
        },
        // Anchors: right edge and top edge
        Placement::LeftBottom => match (px > max_x, py < min_y) {
            (false, false) => {
                ResizeStep::new((min_x + offset.x, min_y), (max_x, max_y + offset.y), SouthWest)
            }
            (true, false) => ResizeStep::new((max_x, min_y), (px, max_y + offset.y), SouthEast),
            (false, true) => ResizeStep::new((min_x + offset.x, py), (max_x, min_y), NorthWest),
            (true, true) => ResizeStep::new((max_x, py), (px, min_y), NorthEast),
        },
        // Anchors: right edge and bottom edge
        Placement::LeftTop => match (px > max_x, py > max_y) {
            (false, false) => {
                ResizeStep::new((min_x + offset.x, min_y + offset.y), (max_x, max_y), NorthWest)
            }
            (true, false) => ResizeStep::new((max_x, min_y + offset.y), (px, max_y), NorthEast),
            (false, true) => ResizeStep::new((min_x + offset.x, max_y), (max_x, py), SouthWest),
            (true, true) => ResizeStep::new((max_x, max_y), (px, py), SouthEast),
        },
    }
}
