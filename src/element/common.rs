use egui::{Pos2, Rect};

/// Build the canonical rectangle spanned by two arbitrary corner points
pub(crate) fn normalized_rect(a: Pos2, b: Pos2) -> Rect {
    Rect::from_min_max(
        Pos2::new(a.x.min(b.x), a.y.min(b.y)),
        Pos2::new(a.x.max(b.x), a.y.max(b.y)),
    )
}

/// The four corners of a rect: min-x/min-y, max-x/min-y, max-x/max-y, min-x/max-y
pub(crate) fn rect_corners(rect: &Rect) -> [Pos2; 4] {
    [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ]
}

/// Nonzero-winding containment test over the closed loop `points`.
///
/// Matches the default fill rule used when the host tests a point against a
/// filled path, so self-intersecting loops count overlapped regions as inside.
pub(crate) fn polygon_contains(points: &[Pos2], pos: Pos2) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut winding = 0i32;
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        // Cross product sign: >0 when pos is left of a->b
        let side = (b.x - a.x) * (pos.y - a.y) - (pos.x - a.x) * (b.y - a.y);
        if a.y <= pos.y {
            if b.y > pos.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= pos.y && side < 0.0 {
            winding -= 1;
        }
    }

    winding != 0
}
